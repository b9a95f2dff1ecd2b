/// Serial data (SB) register.
pub(super) const SB_ADDR: usize = 0xFF01;
/// Serial control (SC) register.
pub(super) const SC_ADDR: usize = 0xFF02;
/// SC value test ROMs write to push SB out of the port.
pub(super) const TRANSFER_SENTINEL: u8 = 0x81;

/// Receives each byte pushed through the serial port.
pub type SerialSink = Box<dyn FnMut(u8)>;

/// Diagnostic byte sink standing in for the link port.
///
/// Test ROMs print their results one byte at a time over serial. Bytes are
/// kept in `output`, forwarded to an optional sink, and echoed to the log
/// a line at a time.
#[derive(Default)]
pub(super) struct Serial {
    output: Vec<u8>,
    sink: Option<SerialSink>,
    echo: bool,
    line: String,
}

impl Serial {
    pub(super) fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    pub(super) fn set_sink(&mut self, sink: Option<SerialSink>) {
        self.sink = sink;
    }

    pub(super) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(super) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub(super) fn emit(&mut self, byte: u8) {
        self.output.push(byte);
        if let Some(sink) = self.sink.as_mut() {
            sink(byte);
        }

        if !self.echo {
            return;
        }
        if byte == b'\n' {
            log::info!("serial: {}", self.line);
            self.line.clear();
        } else {
            self.line.push(byte as char);
        }
    }
}
