use crate::validation::NewVideoSet;
use crate::Result;
use async_trait::async_trait;
use fiftyfifty_core::{MemberChoice, ResolvedVideo, SetId};
use tracing::trace;

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSet {
    pub id: SetId,
    pub title: String,
}

#[async_trait]
pub trait VideoSets: Send + Sync + 'static {
    /// Validates and stores a new set under a freshly generated id.
    async fn create(&self, request: NewVideoSet) -> Result<CreatedSet>;

    /// Looks up one member of a set.
    /// Returns `None` if the set does not exist.
    async fn resolve(&self, id: &SetId, choice: MemberChoice) -> Result<Option<ResolvedVideo>>;

    /// Like [`VideoSets::resolve`], but for an id straight off the wire.
    ///
    /// An id that can never have been issued is reported as not found.
    async fn resolve_raw(&self, raw_id: &str, choice: MemberChoice) -> Result<Option<ResolvedVideo>> {
        match SetId::parse(raw_id) {
            Ok(id) => self.resolve(&id, choice).await,
            Err(err) => {
                trace!(raw_id, error = %err, "rejecting malformed set id");
                Ok(None)
            }
        }
    }
}
