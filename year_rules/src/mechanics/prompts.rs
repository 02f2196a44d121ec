//! Narrative prompts offered to the active player, grouped by season.

use serde::{Deserialize, Serialize};

use super::Season;

/// Ordered prompt lists for every season.
///
/// Every season is always present; an empty list is representable but rejected
/// when a session is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPrompts {
    #[serde(rename = "Spring")]
    pub spring: Vec<String>,
    #[serde(rename = "Summer")]
    pub summer: Vec<String>,
    #[serde(rename = "Autumn")]
    pub autumn: Vec<String>,
    #[serde(rename = "Winter")]
    pub winter: Vec<String>,
}

impl SeasonPrompts {
    /// Prompts for a season, in order.
    pub fn for_season(&self, season: Season) -> &[String] {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        }
    }

    /// Replace the prompts of a single season.
    pub fn with_season(mut self, season: Season, prompts: Vec<String>) -> Self {
        *self.for_season_mut(season) = prompts;
        self
    }

    /// The first season that has no prompts at all, if any.
    pub fn first_empty_season(&self) -> Option<Season> {
        Season::ALL
            .into_iter()
            .find(|season| self.for_season(*season).is_empty())
    }

    fn for_season_mut(&mut self, season: Season) -> &mut Vec<String> {
        match season {
            Season::Spring => &mut self.spring,
            Season::Summer => &mut self.summer,
            Season::Autumn => &mut self.autumn,
            Season::Winter => &mut self.winter,
        }
    }
}

impl Default for SeasonPrompts {
    fn default() -> Self {
        fn owned(prompts: [&str; 2]) -> Vec<String> {
            prompts.into_iter().map(str::to_string).collect()
        }

        Self {
            spring: owned([
                "A new settlement has been established. What is it called and what draws people there?",
                "Spring rains have revealed something previously hidden. What is it and how does it affect the community?",
            ]),
            summer: owned([
                "A traveling merchant arrives with unusual goods. What are they and what do they offer in exchange?",
                "The heat has caused a problem with the water supply. How do the communities respond?",
            ]),
            autumn: owned([
                "Harvest time brings both abundance and conflict. What resources are being contested?",
                "A mysterious figure arrives claiming to have knowledge of the coming winter. What do they say?",
            ]),
            winter: owned([
                "A harsh storm has trapped a group of people. How do the other communities respond?",
                "An old structure has collapsed under the weight of snow. What is discovered beneath it?",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_cover_every_season() {
        let prompts = SeasonPrompts::default();
        for season in Season::ALL {
            assert_eq!(prompts.for_season(season).len(), 2);
        }
        assert!(prompts.first_empty_season().is_none());
    }

    #[test]
    fn test_with_season_override() {
        let prompts = SeasonPrompts::default().with_season(Season::Winter, vec![]);
        assert_eq!(prompts.first_empty_season(), Some(Season::Winter));
        assert_eq!(prompts.for_season(Season::Spring).len(), 2);
    }

    #[test]
    fn test_prompts_serialize_with_season_keys() {
        let value = serde_json::to_value(SeasonPrompts::default()).unwrap();
        assert!(value.get("Spring").is_some());
        assert!(value.get("Winter").is_some());
        assert!(value.get("spring").is_none());
    }
}
