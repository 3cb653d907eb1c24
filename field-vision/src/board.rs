use parking_lot::RwLock;

/// A value shared between the perception thread and its producers or consumers.
///
/// Readers always get a complete copy of the last published value. A writer replaces the
/// value in one step, so nobody ever observes a half written tick.
#[derive(Debug, Default)]
pub struct Blackboard<T> {
    slot: RwLock<Published<T>>,
}

/// A value along with the number of times the board has been written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Published<T> {
    pub generation: u64,
    pub value: T,
}

impl<T> Blackboard<T>
where
    T: Clone,
{
    pub fn new(value: T) -> Self {
        Self {
            slot: RwLock::new(Published {
                generation: 0,
                value,
            }),
        }
    }

    /// Copies the current value out under the read lock.
    pub fn snapshot(&self) -> Published<T> {
        self.slot.read().clone()
    }

    /// Replaces the value and returns its generation.
    pub fn publish(&self, value: T) -> u64 {
        let mut slot = self.slot.write();
        slot.generation += 1;
        slot.value = value;
        slot.generation
    }

    /// Runs `f` on the current value without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.read().value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn generations_count_publishes() {
        let board = Blackboard::new(Vec::<u32>::new());
        assert_eq!(board.publish(vec![1]), 1);
        assert_eq!(board.publish(vec![1, 2]), 2);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.value, vec![1, 2]);
    }

    #[test]
    fn readers_never_see_partial_writes() {
        let board = Arc::new(Blackboard::new(vec![0u32; 64]));
        let writer = {
            let board = board.clone();
            thread::spawn(move || {
                for i in 1..200 {
                    board.publish(vec![i; 64]);
                }
            })
        };
        for _ in 0..200 {
            board.read(|value| assert!(value.iter().all(|&v| v == value[0])));
        }
        writer.join().unwrap();
    }
}
