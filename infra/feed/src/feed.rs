use crate::error::FeedError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{trace, warn};

/// A safe default for channel buffers.
/// 128 is usually enough for record changes in a vertical slice.
const DEFAULT_CAPACITY: usize = 128;
const MIN_CAPACITY: usize = 1;

/// Marker trait for record-change types carried by the [`ChangeFeed`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Change: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Change for T {}

/// Channel semantics registered for a change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    /// Fan-out to every observer.
    Broadcast { capacity: usize },
    /// Bounded queue draining into a single trigger worker.
    Queue { capacity: usize },
}

struct Slot {
    kind: SlotKind,
    /// `broadcast::Sender<Arc<T>>` or `mpsc::Sender<Arc<T>>`, depending on kind.
    sender: Box<dyn Any + Send + Sync>,
    /// Pending `mpsc::Receiver<Arc<T>>` until a trigger claims it.
    pending_rx: Option<Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("kind", &self.kind)
            .field("trigger_attached", &self.pending_rx.is_none())
            .finish()
    }
}

/// A thread-safe, typed change feed.
///
/// Repository writes emit change records; workers either observe them
/// (broadcast fan-out) or attach as the single trigger of a bounded queue,
/// which is the closest in-process analogue of a container change-feed
/// trigger firing a function.
#[derive(Debug, Clone, Default)]
pub struct ChangeFeed {
    slots: Arc<RwLock<FxHashMap<TypeId, Slot>>>,
}

impl ChangeFeed {
    /// Creates a new, empty `ChangeFeed`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes changes of type `T` with the default broadcast capacity.
    ///
    /// # Errors
    /// Returns [`FeedError::KindMismatch`] if `T` is already registered as a
    /// queue-backed trigger.
    pub fn observe<T: Change>(&self) -> Result<broadcast::Receiver<Arc<T>>, FeedError> {
        self.observe_with_capacity(DEFAULT_CAPACITY)
    }

    /// Observes changes of type `T` with a specific broadcast buffer capacity.
    ///
    /// # Errors
    /// Returns [`FeedError::KindMismatch`] for a queue-registered type, or
    /// [`FeedError::InvalidCapacity`] if `capacity` is zero.
    pub fn observe_with_capacity<T: Change>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, FeedError> {
        let capacity = validate_capacity(capacity)?;
        let sender = self.broadcast_sender::<T>(capacity)?;
        Ok(sender.subscribe())
    }

    /// Attaches the single trigger worker for changes of type `T`.
    ///
    /// The returned receiver drains a bounded queue; each change is delivered
    /// to exactly one worker, mirroring "a write fires the trigger function".
    ///
    /// # Errors
    /// Returns [`FeedError::TriggerTaken`] if a trigger was already attached,
    /// [`FeedError::KindMismatch`] for a broadcast-registered type, or
    /// [`FeedError::InvalidCapacity`] if `capacity` is zero.
    pub fn attach_trigger<T: Change>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Receiver<Arc<T>>, FeedError> {
        let capacity = validate_capacity(capacity)?;
        let id = TypeId::of::<T>();
        let mut slots = self.slots.write();

        if let Some(slot) = slots.get_mut(&id) {
            match slot.kind {
                SlotKind::Queue { capacity: existing } => {
                    if existing != capacity {
                        warn!(
                            change = std::any::type_name::<T>(),
                            existing,
                            requested = capacity,
                            "Queue already initialized with a different capacity"
                        );
                    }
                    let rx = slot.pending_rx.take().ok_or_else(|| FeedError::TriggerTaken {
                        message: std::any::type_name::<T>().into(),
                        context: None,
                    })?;
                    return rx.downcast::<mpsc::Receiver<Arc<T>>>().map(|b| *b).map_err(|_| {
                        FeedError::TypeMismatch {
                            message: std::any::type_name::<T>().into(),
                            context: Some("Unexpected change type".into()),
                        }
                    });
                },
                SlotKind::Broadcast { .. } => {
                    return Err(kind_mismatch::<T>("Queue", slot.kind));
                },
            }
        }

        trace!(change = std::any::type_name::<T>(), capacity, "Initializing change queue");
        let (tx, rx) = mpsc::channel::<Arc<T>>(capacity);
        slots.insert(
            id,
            Slot {
                kind: SlotKind::Queue { capacity },
                sender: Box::new(tx),
                pending_rx: None,
            },
        );
        Ok(rx)
    }

    /// Emits a change via broadcast, returning the number of observers reached.
    ///
    /// A change with no observers is dropped silently (count 0), matching
    /// trigger semantics for containers nobody watches.
    ///
    /// # Errors
    /// Returns [`FeedError::KindMismatch`] if `T` is registered as a queue.
    pub fn emit<T: Change>(&self, change: T) -> Result<usize, FeedError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;
        match sender.send(Arc::new(change)) {
            Ok(count) => {
                trace!(change = std::any::type_name::<T>(), count, "Change dispatched");
                Ok(count)
            },
            Err(_) => {
                trace!(change = std::any::type_name::<T>(), "Change dropped: no observers");
                Ok(0)
            },
        }
    }

    /// Enqueues a change for the trigger worker of type `T`.
    ///
    /// Creates the queue with the default capacity if the trigger has not
    /// attached yet; the change waits in the buffer until it does.
    ///
    /// # Errors
    /// Returns [`FeedError::QueueFull`] when the buffer is exhausted, or
    /// [`FeedError::KindMismatch`] if `T` is registered as broadcast.
    pub fn enqueue<T: Change>(&self, change: T) -> Result<(), FeedError> {
        let sender = self.queue_sender::<T>(DEFAULT_CAPACITY)?;
        sender.try_send(Arc::new(change)).map_err(|e| FeedError::QueueFull {
            message: e.to_string().into(),
            context: Some(std::any::type_name::<T>().into()),
        })
    }

    /// Gracefully shuts down the feed by dropping all underlying channels.
    ///
    /// Returns the number of change channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut slots = self.slots.write();
        let count = slots.len();
        slots.clear();
        count
    }

    fn broadcast_sender<T: Change>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, FeedError> {
        let id = TypeId::of::<T>();

        {
            let slots = self.slots.read();
            if let Some(slot) = slots.get(&id) {
                return match slot.kind {
                    SlotKind::Broadcast { capacity: existing } => {
                        if existing != capacity {
                            warn!(
                                change = std::any::type_name::<T>(),
                                existing,
                                requested = capacity,
                                "Broadcast already initialized with a different capacity"
                            );
                        }
                        downcast_sender::<T, broadcast::Sender<Arc<T>>>(&*slot.sender)
                    },
                    SlotKind::Queue { .. } => Err(kind_mismatch::<T>("Broadcast", slot.kind)),
                };
            }
        }

        let mut slots = self.slots.write();
        let slot = slots.entry(id).or_insert_with(|| {
            trace!(change = std::any::type_name::<T>(), capacity, "Initializing broadcast channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            Slot { kind: SlotKind::Broadcast { capacity }, sender: Box::new(tx), pending_rx: None }
        });
        match slot.kind {
            SlotKind::Broadcast { .. } => {
                downcast_sender::<T, broadcast::Sender<Arc<T>>>(&*slot.sender)
            },
            SlotKind::Queue { .. } => Err(kind_mismatch::<T>("Broadcast", slot.kind)),
        }
    }

    fn queue_sender<T: Change>(&self, capacity: usize) -> Result<mpsc::Sender<Arc<T>>, FeedError> {
        let id = TypeId::of::<T>();

        {
            let slots = self.slots.read();
            if let Some(slot) = slots.get(&id) {
                return match slot.kind {
                    SlotKind::Queue { .. } => {
                        downcast_sender::<T, mpsc::Sender<Arc<T>>>(&*slot.sender)
                    },
                    SlotKind::Broadcast { .. } => Err(kind_mismatch::<T>("Queue", slot.kind)),
                };
            }
        }

        let mut slots = self.slots.write();
        let slot = slots.entry(id).or_insert_with(|| {
            trace!(change = std::any::type_name::<T>(), capacity, "Initializing change queue");
            let (tx, rx) = mpsc::channel::<Arc<T>>(capacity);
            Slot {
                kind: SlotKind::Queue { capacity },
                sender: Box::new(tx),
                pending_rx: Some(Box::new(rx)),
            }
        });
        match slot.kind {
            SlotKind::Queue { .. } => downcast_sender::<T, mpsc::Sender<Arc<T>>>(&*slot.sender),
            SlotKind::Broadcast { .. } => Err(kind_mismatch::<T>("Queue", slot.kind)),
        }
    }
}

fn downcast_sender<T: Change, S: Clone + 'static>(
    sender: &(dyn Any + Send + Sync),
) -> Result<S, FeedError> {
    sender.downcast_ref::<S>().cloned().ok_or_else(|| FeedError::TypeMismatch {
        message: std::any::type_name::<T>().into(),
        context: Some("Unexpected change type".into()),
    })
}

fn kind_mismatch<T: Change>(expected: &str, found: SlotKind) -> FeedError {
    FeedError::KindMismatch {
        message: format!("Expected {expected} but found {found:?} for {}", std::any::type_name::<T>())
            .into(),
        context: None,
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, FeedError> {
    if capacity < MIN_CAPACITY {
        return Err(FeedError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
