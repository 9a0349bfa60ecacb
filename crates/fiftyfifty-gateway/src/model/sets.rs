use fiftyfifty_core::{Member, ResolvedVideo};
use fiftyfifty_service::{CreatedSet, NewVideoSet, ValidationErrors};
use serde::{Deserialize, Serialize};

/// The create form. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateSetForm {
    pub title: String,
    pub vida: String,
    pub vidb: String,
    pub timea: String,
    pub timeb: String,
}

impl CreateSetForm {
    pub fn into_new_set(self, creator_address: String) -> NewVideoSet {
        NewVideoSet {
            title: self.title,
            video_a: self.vida,
            video_b: self.vidb,
            time_a: self.timea,
            time_b: self.timeb,
            creator_address,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSetResponse {
    pub set_title: String,
    pub vid_set: String,
}

impl From<CreatedSet> for CreatedSetResponse {
    fn from(created: CreatedSet) -> Self {
        Self {
            set_title: created.title,
            vid_set: created.id.to_string(),
        }
    }
}

/// Returned on a rejected create, echoing the submitted form back.
#[derive(Debug, Serialize)]
pub struct ValidationFailedResponse {
    pub errors: Vec<&'static str>,
    #[serde(flatten)]
    pub form: CreateSetForm,
}

impl ValidationFailedResponse {
    pub fn new(errors: &ValidationErrors, form: CreateSetForm) -> Self {
        Self {
            errors: errors.messages(),
            form,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVideoResponse {
    pub title: String,
    pub vid_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u32>,
    pub vid_set: String,
    pub alt: Member,
}

impl From<ResolvedVideo> for ResolvedVideoResponse {
    fn from(video: ResolvedVideo) -> Self {
        Self {
            title: video.title,
            vid_id: video.video_id.to_string(),
            start_time: video.start_time,
            vid_set: video.set_id.to_string(),
            alt: video.alternate,
        }
    }
}
