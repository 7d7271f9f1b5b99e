// ============================================================================
// READY GATE - Latch de resolución única
// ============================================================================
// Primitiva one-shot broadcast: open() resuelve exactamente una vez
// (llamadas posteriores son no-ops, garantizado por la primitiva y no
// por null-checks manuales), wait() suspende hasta la apertura. Puede
// esperarse desde cualquier número de call sites a la vez.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;

#[derive(Default)]
struct GateInner {
    open: bool,
    waiters: Vec<oneshot::Sender<()>>,
}

#[derive(Clone, Default)]
pub struct ReadyGate {
    inner: Rc<RefCell<GateInner>>,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().open
    }

    /// Abrir el gate y despertar a todos los waiters. Idempotente.
    pub fn open(&self) {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if inner.open {
                return;
            }
            inner.open = true;
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }

    /// Esperar la apertura. Retorna de inmediato si ya está abierto.
    pub async fn wait(&self) {
        let receiver = {
            let mut inner = self.inner.borrow_mut();
            if inner.open {
                None
            } else {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push(tx);
                Some(rx)
            }
        };
        if let Some(rx) = receiver {
            // Si el gate se destruye sin abrirse, el sender se dropea y
            // el receiver resuelve igualmente: nadie queda colgado
            let _ = rx.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    #[test]
    fn wait_after_open_returns_immediately() {
        let gate = ReadyGate::new();
        gate.open();
        block_on(gate.wait());
        assert!(gate.is_open());
    }

    #[test]
    fn open_is_idempotent() {
        let gate = ReadyGate::new();
        gate.open();
        gate.open();
        assert!(gate.is_open());
        block_on(gate.wait());
    }

    #[test]
    fn all_waiters_resume_together_on_open() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let gate = ReadyGate::new();
        let resumed = Rc::new(Cell::new(0u32));

        for _ in 0..3 {
            let gate = gate.clone();
            let resumed = resumed.clone();
            spawner
                .spawn_local(async move {
                    gate.wait().await;
                    resumed.set(resumed.get() + 1);
                })
                .unwrap();
        }

        // Nadie avanza antes de la apertura
        pool.run_until_stalled();
        assert_eq!(resumed.get(), 0);

        gate.open();
        pool.run_until_stalled();
        assert_eq!(resumed.get(), 3);
    }

    #[test]
    fn late_waiter_does_not_block_after_open() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let gate = ReadyGate::new();
        gate.open();

        let resumed = Rc::new(Cell::new(false));
        {
            let gate = gate.clone();
            let resumed = resumed.clone();
            spawner
                .spawn_local(async move {
                    gate.wait().await;
                    resumed.set(true);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(resumed.get());
    }
}
