use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::emitter::StreamEmitter;
use crate::event::Event;
use crate::registry::ProviderRegistry;

/// The repeating collect, emit, sleep loop over a fixed selection.
pub struct Cycle {
    registry: ProviderRegistry,
    slots: Vec<usize>,
    interval: Duration,
}

impl Cycle {
    /// Bind a selection to the registry. Unknown names fail here, before any
    /// output is written.
    pub fn new(
        registry: ProviderRegistry,
        selection: &[String],
        interval: Duration,
    ) -> Result<Self> {
        let slots = registry.resolve(selection)?;
        Ok(Self {
            registry,
            slots,
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Selected provider names, in collection order.
    pub fn selection(&self) -> Vec<&'static str> {
        self.slots.iter().map(|&s| self.registry.at(s).name()).collect()
    }

    /// Invoke every selected provider once, in selection order.
    pub fn tick(&self) -> Vec<Event> {
        self.slots
            .iter()
            .map(|&s| self.registry.at(s).collect())
            .collect()
    }

    /// Write the header and run cycles until `stop` is set.
    ///
    /// `stop` is only observed between cycles: a provider call in flight
    /// always completes and its cycle is always emitted. The sleep is a plain
    /// pause after each emission with no drift correction.
    pub fn run<W: Write>(
        &self,
        emitter: &mut StreamEmitter<W>,
        stop: &AtomicBool,
    ) -> io::Result<()> {
        emitter.write_header()?;
        while !stop.load(Ordering::SeqCst) {
            let events = self.tick();
            emitter.emit(&events)?;
            tracing::trace!(
                cycle = emitter.cycles(),
                events = events.len(),
                "cycle emitted"
            );
            thread::sleep(self.interval);
        }
        tracing::info!(cycles = emitter.cycles(), "stream stopped");
        Ok(())
    }
}
