use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Number of characters in a video platform identifier.
pub const VIDEO_ID_LENGTH: usize = 11;

/// A canonical video identifier on the video platform.
///
/// Exactly eleven characters drawn from `[A-Za-z0-9_-]`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoId(SmolStr);

impl VideoId {
    pub fn parse(id: impl AsRef<str>) -> Result<Self, CoreError> {
        let id = id.as_ref();
        if id.len() != VIDEO_ID_LENGTH || !id.bytes().all(is_video_id_byte) {
            return Err(CoreError::InvalidVideoId(id.to_string()));
        }
        Ok(Self(SmolStr::new(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_video_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl std::fmt::Debug for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VideoId").field(&self.0).finish()
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        VideoId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// One member of a video set: a video plus an optional start offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub video_id: VideoId,
    /// Start offset in seconds. `None` when no offset (or a zero offset) was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u32>,
}

impl VideoRef {
    pub fn new(video_id: VideoId, start_time: Option<u32>) -> Self {
        Self {
            video_id,
            start_time,
        }
    }
}

/// Selects one of the two members of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    A,
    B,
}

impl Member {
    /// The member a caller would switch to in order to "watch the other one".
    pub fn other(self) -> Member {
        match self {
            Member::A => Member::B,
            Member::B => Member::A,
        }
    }

    /// Picks `A` or `B` with an independent, uniform 50/50 probability.
    pub fn random() -> Member {
        if rand::random::<bool>() {
            Member::A
        } else {
            Member::B
        }
    }

    /// Parses the lowercase path selector (`a` or `b`).
    pub fn from_selector(selector: &str) -> Option<Member> {
        match selector {
            "a" => Some(Member::A),
            "b" => Some(Member::B),
            _ => None,
        }
    }

    pub fn as_selector(self) -> &'static str {
        match self {
            Member::A => "a",
            Member::B => "b",
        }
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_selector())
    }
}

/// What the caller asked for: a specific member, or either one at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChoice {
    Specific(Member),
    Random,
}

impl MemberChoice {
    /// Turns the choice into a concrete member.
    ///
    /// The random branch never looks at the set being resolved.
    pub fn resolve(self) -> Member {
        match self {
            MemberChoice::Specific(member) => member,
            MemberChoice::Random => Member::random(),
        }
    }
}

impl From<Member> for MemberChoice {
    fn from(member: Member) -> Self {
        MemberChoice::Specific(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_accepts_platform_alphabet() {
        assert!(VideoId::parse("dQw4w9WgXcQ").is_ok());
        assert!(VideoId::parse("a-b_c-d_e-f").is_ok());
    }

    #[test]
    fn video_id_rejects_bad_input() {
        assert!(VideoId::parse("dQw4w9WgXc").is_err());
        assert!(VideoId::parse("dQw4w9WgXcQQ").is_err());
        assert!(VideoId::parse("dQw4w9WgX!Q").is_err());
        assert!(VideoId::parse("").is_err());
    }

    #[test]
    fn other_member_flips() {
        assert_eq!(Member::A.other(), Member::B);
        assert_eq!(Member::B.other(), Member::A);
    }

    #[test]
    fn selectors() {
        assert_eq!(Member::from_selector("a"), Some(Member::A));
        assert_eq!(Member::from_selector("b"), Some(Member::B));
        assert_eq!(Member::from_selector("A"), None);
        assert_eq!(Member::from_selector("c"), None);
        assert_eq!(Member::B.to_string(), "b");
    }

    #[test]
    fn specific_choice_is_stable() {
        for _ in 0..100 {
            assert_eq!(MemberChoice::Specific(Member::B).resolve(), Member::B);
        }
    }

    #[test]
    fn random_choice_is_roughly_even() {
        let trials = 10_000;
        let a_count = (0..trials)
            .filter(|_| MemberChoice::Random.resolve() == Member::A)
            .count();

        // 10k fair coin flips stay within +/-5% of half with overwhelming probability.
        assert!(
            (4_500..=5_500).contains(&a_count),
            "expected roughly half A picks, got {a_count}/{trials}"
        );
    }

    #[test]
    fn video_ref_omits_absent_start_time() {
        let video = VideoRef::new(VideoId::parse("dQw4w9WgXcQ").unwrap(), None);
        let json = serde_json::to_string(&video).unwrap();
        assert_eq!(json, r#"{"video_id":"dQw4w9WgXcQ"}"#);

        let timed = VideoRef::new(VideoId::parse("dQw4w9WgXcQ").unwrap(), Some(90));
        let json = serde_json::to_string(&timed).unwrap();
        assert_eq!(json, r#"{"video_id":"dQw4w9WgXcQ","start_time":90}"#);
    }

    #[test]
    fn video_id_deserialize_validates() {
        assert!(serde_json::from_str::<VideoId>(r#""dQw4w9WgXcQ""#).is_ok());
        assert!(serde_json::from_str::<VideoId>(r#""short""#).is_err());
    }
}
