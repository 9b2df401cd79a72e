use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::warn;

static POISON_RECOVERY_REPORTED: AtomicBool = AtomicBool::new(false);

// Only the first recovery per process is reported.
fn report_poison_recovery(lock_name: &'static str, operation: &'static str) {
    if !POISON_RECOVERY_REPORTED.swap(true, Ordering::Relaxed) {
        warn!(lock_name, operation, "lock_poisoned_recovered");
    }
}

/// Clones the guarded value, ignoring poison left by a panicked writer.
pub(crate) fn read_or_recover<T: Clone>(lock: &RwLock<T>, lock_name: &'static str) -> T {
    let guard = lock.read().unwrap_or_else(|poisoned| {
        report_poison_recovery(lock_name, "read");
        poisoned.into_inner()
    });
    guard.clone()
}

/// Replaces the guarded value, ignoring poison left by a panicked writer.
pub(crate) fn replace_or_recover<T>(lock: &RwLock<T>, lock_name: &'static str, value: T) {
    let mut guard = lock.write().unwrap_or_else(|poisoned| {
        report_poison_recovery(lock_name, "write");
        poisoned.into_inner()
    });
    *guard = value;
}

#[cfg(test)]
pub(crate) fn poison<T: Send + Sync>(lock: &RwLock<T>) {
    std::thread::scope(|scope| {
        let _ = scope
            .spawn(|| {
                let _guard = lock.write().expect("write guard");
                panic!("poisoning lock on purpose");
            })
            .join();
    });
}
