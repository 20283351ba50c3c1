use mockall::mock;
use spimaster_core::slave::SpiSlave;
use std::sync::{Arc, Mutex};

mock! {
    pub Slave {}
    impl SpiSlave for Slave {
        fn name(&self) -> &'static str;
        fn select(&mut self);
        fn deselect(&mut self);
        fn miso(&self) -> bool;
        fn sclk_rising(&mut self, mosi: bool);
        fn sclk_falling(&mut self);
    }
}

/// Bus activity seen by a [`RecordingSlave`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusLog {
    pub selects: u32,
    pub deselects: u32,
    pub mosi_bits: Vec<bool>,
    pub falling_edges: u32,
}

impl BusLog {
    /// Packs the recorded MOSI bits into bytes, MSB first.
    pub fn bytes(&self) -> Vec<u8> {
        self.mosi_bits
            .chunks(8)
            .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .collect()
    }
}

/// A slave that records every bus event and answers with a fixed byte.
#[derive(Clone, Debug)]
pub struct RecordingSlave {
    pub log: Arc<Mutex<BusLog>>,
    reply: u8,
    out: u8,
    level: bool,
    selected: bool,
}

impl RecordingSlave {
    pub fn new(reply: u8) -> Self {
        Self {
            log: Arc::new(Mutex::new(BusLog::default())),
            reply,
            out: 0,
            level: false,
            selected: false,
        }
    }

    pub fn snapshot(&self) -> BusLog {
        self.log.lock().unwrap().clone()
    }
}

impl SpiSlave for RecordingSlave {
    fn name(&self) -> &str {
        "RECORDER"
    }

    fn select(&mut self) {
        self.selected = true;
        self.out = self.reply;
        self.log.lock().unwrap().selects += 1;
    }

    fn deselect(&mut self) {
        self.selected = false;
        self.log.lock().unwrap().deselects += 1;
    }

    fn miso(&self) -> bool {
        self.selected && self.level
    }

    fn sclk_rising(&mut self, mosi: bool) {
        self.log.lock().unwrap().mosi_bits.push(mosi);
    }

    fn sclk_falling(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.falling_edges += 1;
        // Data phase starts after the command byte.
        if log.mosi_bits.len() >= 8 {
            self.level = self.out & 0x80 != 0;
            self.out <<= 1;
        }
    }
}
