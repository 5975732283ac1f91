//! Live-handle registry
//!
//! Records every pointer this library hands out and panics if a destroy
//! entry point receives one it does not know, catching double-free and
//! wrong-allocator release in tests.

use std::sync::Mutex;

static LIVE: Mutex<Vec<usize>> = Mutex::new(Vec::new());

pub(crate) fn register(ptr: usize) {
    LIVE.lock().expect("handle registry poisoned").push(ptr);
}

pub(crate) fn unregister(ptr: usize) {
    let mut live = LIVE.lock().expect("handle registry poisoned");
    match live.iter().position(|&p| p == ptr) {
        Some(index) => {
            live.swap_remove(index);
        }
        None => panic!("destroy of unknown or already-destroyed handle {ptr:#x}"),
    }
}
