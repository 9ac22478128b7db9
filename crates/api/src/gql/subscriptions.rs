use async_graphql::{Context, Result, Subscription};
use futures_util::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::gql::types::Player;
use crate::state::AppState;

/// Topic carrying newly signed players.
pub const NEW_SIGNING: &str = "NEW_SIGNING";

const CHANNEL_CAPACITY: usize = 100;

/// In-process fan-out of new signings. Subscribers only see events published
/// after they subscribed.
#[derive(Clone)]
pub struct SigningNotifier {
    sender: broadcast::Sender<Player>,
}

impl Default for SigningNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SigningNotifier {
    pub fn new() -> Self {
        Self {
            sender: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Deliver to every current subscriber without waiting on any of them.
    pub fn publish(&self, player: Player) {
        // An error only means nobody is listening
        let delivered = self.sender.send(player).unwrap_or(0);
        tracing::debug!(topic = NEW_SIGNING, delivered, "published signing");
    }

    /// Stream of future signings. A subscriber that falls more than
    /// `CHANNEL_CAPACITY` events behind skips the ones it missed.
    pub fn subscribe(&self) -> impl Stream<Item = Player> + Send + 'static {
        BroadcastStream::new(self.sender.subscribe()).filter_map(|event| async move {
            match event {
                Ok(player) => Some(player),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = NEW_SIGNING, skipped, "subscriber lagged");
                    None
                }
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Players as they are signed.
    async fn new_signing(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Player>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.signings().subscribe())
    }
}
