use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a frame was not proposed as a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    Blur,
    Glare,
    Duplicate,
    TooDark,
    TooBright,
    MotionBlur,
}

impl RejectionReason {
    /// Short explanation a host app can show when this reason dominates a pass.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Blur => "frames were out of focus",
            Self::Glare => "the page was washed out by glare",
            Self::Duplicate => "the camera did not move between pages",
            Self::TooDark => "video was too dark",
            Self::TooBright => "video was overexposed",
            Self::MotionBlur => "the camera was moving too fast",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blur => "BLUR",
            Self::Glare => "GLARE",
            Self::Duplicate => "DUPLICATE",
            Self::TooDark => "TOO_DARK",
            Self::TooBright => "TOO_BRIGHT",
            Self::MotionBlur => "MOTION_BLUR",
        };
        f.write_str(name)
    }
}

/// Count of rejected candidates per reason.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionHistogram {
    counts: BTreeMap<RejectionReason, usize>,
}

impl RejectionHistogram {
    pub fn record(&mut self, reason: RejectionReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn count(&self, reason: RejectionReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Reasons with a non-zero count, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (RejectionReason, usize)> + '_ {
        self.counts.iter().map(|(r, c)| (*r, *c))
    }

    /// The most frequent reason. Ties go to the reason declared first.
    pub fn dominant(&self) -> Option<RejectionReason> {
        self.counts
            .iter()
            .fold(None, |best: Option<(RejectionReason, usize)>, (&r, &c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((r, c)),
            })
            .map(|(r, _)| r)
    }
}
