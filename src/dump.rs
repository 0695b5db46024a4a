use crate::transmit::Transmit;

/// Forwards a serialized grid only when it differs from the last dump.
pub struct Dumper {
    last: String,
    transmitter: Box<dyn Transmit>,
}

impl Dumper {
    pub fn new(transmitter: Box<dyn Transmit>) -> Self {
        Self {
            last: String::new(),
            transmitter,
        }
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    /// Returns true when a transmission was dispatched.
    pub fn dump(&mut self, encoded: String) -> bool {
        if encoded == self.last {
            return false;
        }
        self.transmitter.send(&encoded);
        self.last = encoded;
        true
    }
}
