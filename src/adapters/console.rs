//! Serial console interrupt listener.
//!
//! A background thread watches stdin (UART / USB-CDC on the device) for
//! Ctrl-C or `q` and raises the shared stop flag.  The flag is the only
//! datum shared with the control loop; it is polled once per cycle.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::io::{self, Read};

use log::{debug, info, warn};

const CTRL_C: u8 = 0x03;
/// Idle poll period when the console has no data pending.
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const STACK_SIZE: usize = 4096;

/// Bytes that request an orderly shutdown.
pub fn is_interrupt(byte: u8) -> bool {
    matches!(byte, CTRL_C | b'q' | b'Q')
}

/// Spawn the listener thread on the process stdin.
pub fn spawn_interrupt_listener(
    stop: &'static AtomicBool,
) -> io::Result<std::thread::JoinHandle<()>> {
    spawn_listener(io::stdin(), stop)
}

/// Spawn the listener thread on any byte source.
pub fn spawn_listener<R>(
    input: R,
    stop: &'static AtomicBool,
) -> io::Result<std::thread::JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(STACK_SIZE)
        .spawn(move || {
            watch(input, stop);
        })
}

/// Read `input` until an interrupt byte arrives or the stream ends.
///
/// Returns `true` if the stop flag was raised.
pub fn watch<R: Read>(mut input: R, stop: &AtomicBool) -> bool {
    let mut buf = [0u8; 16];
    while !stop.load(Ordering::Relaxed) {
        match input.read(&mut buf) {
            Ok(0) => {
                debug!("console: input closed");
                return false;
            }
            Ok(n) => {
                if buf[..n].iter().copied().any(is_interrupt) {
                    info!("console: interrupt received, stopping after this cycle");
                    stop.store(true, Ordering::Relaxed);
                    return true;
                }
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                warn!("console: read failed ({}), listener exiting", e);
                return false;
            }
        }
    }
    true
}
