// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! A reader-writer lock with writer priority.
//!
//! [`RwLock`] tracks its state explicitly (idle, read-locked with a reader
//! count, or write-locked) behind a small mutex, with one condition variable
//! per waiter class. Any number of readers share the lock; a writer holds it
//! alone. Fairness policy: **writer priority** — once a writer is waiting,
//! new readers queue behind it, so stock updates cannot be starved by a
//! steady stream of catalog reads. The converse starvation (readers behind a
//! steady stream of writers) is possible and accepted for this write-light
//! workload.
//!
//! Acquisition is scoped: [`read`](RwLock::read) and [`write`](RwLock::write)
//! return RAII guards that release on every exit path, panics included.
//! Waits are blocking and unbounded.

use parking_lot::{Condvar, Mutex};
use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};

/// Who currently holds the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    /// No holder.
    Idle,
    /// Held by `n` concurrent readers (`n >= 1`).
    ReadLocked(usize),
    /// Held by exactly one writer.
    WriteLocked,
}

/// Holder bookkeeping, always accessed under the core mutex.
#[derive(Debug)]
struct LockCore {
    state: LockState,
    waiting_writers: usize,
}

/// A reader-writer lock guarding a value of type `T`.
pub struct RwLock<T> {
    core: Mutex<LockCore>,
    readers_cv: Condvar,
    writers_cv: Condvar,
    data: UnsafeCell<T>,
}

// Access to `data` is mediated entirely by the guards, which hold the lock
// in the matching state for as long as they live.
unsafe impl<T: Send> Send for RwLock<T> {}
unsafe impl<T: Send + Sync> Sync for RwLock<T> {}

impl<T> RwLock<T> {
    /// Creates an unlocked lock owning `data`.
    pub fn new(data: T) -> Self {
        RwLock {
            core: Mutex::new(LockCore { state: LockState::Idle, waiting_writers: 0 }),
            readers_cv: Condvar::new(),
            writers_cv: Condvar::new(),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquires shared read access, blocking while a writer holds or awaits
    /// the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        let mut core = self.core.lock();
        // Writer priority: a waiting writer bars new readers, not just an
        // active one.
        while core.state == LockState::WriteLocked || core.waiting_writers > 0 {
            self.readers_cv.wait(&mut core);
        }
        core.state = match core.state {
            LockState::Idle => LockState::ReadLocked(1),
            LockState::ReadLocked(n) => LockState::ReadLocked(n + 1),
            // The wait loop cannot exit write-locked.
            LockState::WriteLocked => unreachable!("reader admitted while write-locked"),
        };
        RwLockReadGuard { lock: self }
    }

    /// Acquires exclusive write access, blocking until all readers and any
    /// earlier writer have released.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        let mut core = self.core.lock();
        core.waiting_writers += 1;
        while core.state != LockState::Idle {
            self.writers_cv.wait(&mut core);
        }
        core.waiting_writers -= 1;
        core.state = LockState::WriteLocked;
        RwLockWriteGuard { lock: self }
    }
}

/// Shared access to the data of an [`RwLock`]. Releases on drop.
pub struct RwLockReadGuard<'a, T> {
    lock: &'a RwLock<T>,
}

impl<T> Deref for RwLockReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // A live read guard keeps the state read-locked, so shared access
        // to the data is sound.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> Drop for RwLockReadGuard<'_, T> {
    fn drop(&mut self) {
        let mut core = self.lock.core.lock();
        if let LockState::ReadLocked(n) = core.state {
            if n > 1 {
                core.state = LockState::ReadLocked(n - 1);
            } else {
                core.state = LockState::Idle;
                if core.waiting_writers > 0 {
                    self.lock.writers_cv.notify_one();
                }
            }
        }
    }
}

/// Exclusive access to the data of an [`RwLock`]. Releases on drop.
pub struct RwLockWriteGuard<'a, T> {
    lock: &'a RwLock<T>,
}

impl<T> Deref for RwLockWriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // A live write guard is the sole holder, so any access is sound.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for RwLockWriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for RwLockWriteGuard<'_, T> {
    fn drop(&mut self) {
        let mut core = self.lock.core.lock();
        core.state = LockState::Idle;
        if core.waiting_writers > 0 {
            self.lock.writers_cv.notify_one();
        } else {
            self.lock.readers_cv.notify_all();
        }
    }
}
