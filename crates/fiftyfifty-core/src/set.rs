use crate::set_id::SetId;
use crate::video::{Member, VideoId, VideoRef};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a set title.
pub const MAX_TITLE_CHARS: usize = 60;

/// A persisted video set.
///
/// Sets are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSet {
    pub id: SetId,
    pub title: String,
    pub a: VideoRef,
    pub b: VideoRef,
    /// Network address of the submitter. Informational only.
    pub creator_address: String,
    pub created_at: Timestamp,
}

impl VideoSet {
    /// The store-shaped projection of this set, i.e. exactly what a lookup reads back.
    pub fn snapshot(&self) -> SetSnapshot {
        SetSnapshot {
            title: self.title.clone(),
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }
}

/// The fields of a [`VideoSet`] needed to answer a lookup.
///
/// This is what the store returns on `get` and what the snapshot cache holds,
/// so a single cached entry can answer for either member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub title: String,
    pub a: VideoRef,
    pub b: VideoRef,
}

impl SetSnapshot {
    pub fn member(&self, member: Member) -> &VideoRef {
        match member {
            Member::A => &self.a,
            Member::B => &self.b,
        }
    }

    /// Shapes the snapshot into the per-request answer for `member`.
    pub fn resolve(&self, id: &SetId, member: Member) -> ResolvedVideo {
        let video = self.member(member);
        ResolvedVideo {
            title: self.title.clone(),
            video_id: video.video_id.clone(),
            start_time: video.start_time,
            set_id: id.clone(),
            member,
            alternate: member.other(),
        }
    }
}

/// The answer to "give me member X (or a random member) of set K".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVideo {
    pub title: String,
    pub video_id: VideoId,
    pub start_time: Option<u32>,
    pub set_id: SetId,
    /// The member that was served.
    pub member: Member,
    /// The other member of the set, for a "watch the other one" link.
    pub alternate: Member,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, start_time: Option<u32>) -> VideoRef {
        VideoRef::new(VideoId::parse(id).unwrap(), start_time)
    }

    fn snapshot() -> SetSnapshot {
        SetSnapshot {
            title: "Cats vs dogs".to_string(),
            a: video("aaaaaaaaaaa", Some(90)),
            b: video("bbbbbbbbbbb", None),
        }
    }

    #[test]
    fn resolve_member_a() {
        let id = SetId::parse("abc123").unwrap();
        let resolved = snapshot().resolve(&id, Member::A);

        assert_eq!(resolved.title, "Cats vs dogs");
        assert_eq!(resolved.video_id.as_str(), "aaaaaaaaaaa");
        assert_eq!(resolved.start_time, Some(90));
        assert_eq!(resolved.set_id, id);
        assert_eq!(resolved.member, Member::A);
        assert_eq!(resolved.alternate, Member::B);
    }

    #[test]
    fn resolve_member_b_without_start_time() {
        let id = SetId::parse("abc123").unwrap();
        let resolved = snapshot().resolve(&id, Member::B);

        assert_eq!(resolved.video_id.as_str(), "bbbbbbbbbbb");
        assert_eq!(resolved.start_time, None);
        assert_eq!(resolved.alternate, Member::A);
    }

    #[test]
    fn snapshot_drops_creation_metadata() {
        let set = VideoSet {
            id: SetId::parse("abc123").unwrap(),
            title: "Cats vs dogs".to_string(),
            a: video("aaaaaaaaaaa", Some(90)),
            b: video("bbbbbbbbbbb", None),
            creator_address: "127.0.0.1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(set.snapshot(), snapshot());
    }
}
