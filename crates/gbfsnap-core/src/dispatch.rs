use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Screen recognized from the location hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Party,
    Zenith,
    Artifact,
    Unrecognized,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Screen::Party => "party",
            Screen::Zenith => "zenith",
            Screen::Artifact => "artifact",
            Screen::Unrecognized => "unrecognized",
        })
    }
}

const PARTY_PREFIXES: &[&str] = &[
    "#party/index/",
    "#party/expectancy_damage/index",
    "#tower/party/index/",
];
const PARTY_EXCLUDED: &str = "#tower/party/expectancy_damage/index/";
const TOWER_PARTY: &str = "#tower/party/index/";

const ZENITH_PREFIXES: &[&str] = &["#zenith/npc", "#tower/zenith/npc"];
static ZENITH_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#event/[a-zA-Z0-9]+/zenith/npc").unwrap());

const ARTIFACT_PREFIXES: &[&str] = &[
    "#list/detail_npc",
    "#party/list/detail_npc",
    "#party/top/detail_npc",
    "#tower/list/detail_npc",
    "#tower/party/top/detail_npc",
];
static ARTIFACT_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#event/[a-zA-Z0-9]+/list/detail_npc").unwrap());

fn is_party(hash: &str) -> bool {
    let listed = PARTY_PREFIXES.iter().any(|p| hash.starts_with(p))
        || (hash.starts_with("#event/sequenceraid") && hash.contains("/party/index/"));
    listed && !hash.starts_with(PARTY_EXCLUDED)
}

/// First matching rule wins.
pub fn classify(hash: &str) -> Screen {
    if is_party(hash) {
        Screen::Party
    } else if ZENITH_PREFIXES.iter().any(|p| hash.starts_with(p)) || ZENITH_EVENT.is_match(hash) {
        Screen::Zenith
    } else if ARTIFACT_PREFIXES.iter().any(|p| hash.starts_with(p))
        || ARTIFACT_EVENT.is_match(hash)
    {
        Screen::Artifact
    } else {
        Screen::Unrecognized
    }
}

/// Tower party screens nest companions one level deeper.
pub fn is_tower_party(hash: &str) -> bool {
    hash.starts_with(TOWER_PARTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_hashes() {
        for h in [
            "#party/index/0/npc/0",
            "#party/expectancy_damage/index",
            "#tower/party/index/3/npc/0",
            "#event/sequenceraid012/party/index/0/npc/0",
        ] {
            assert_eq!(classify(h), Screen::Party, "{h}");
        }
        assert_eq!(classify("#event/sequenceraid012/top"), Screen::Unrecognized);
    }

    #[test]
    fn tower_expectancy_is_not_party() {
        assert_ne!(
            classify("#tower/party/expectancy_damage/index/123"),
            Screen::Party
        );
    }

    #[test]
    fn zenith_and_artifact_hashes() {
        assert_eq!(classify("#zenith/npc/3040001000"), Screen::Zenith);
        assert_eq!(classify("#tower/zenith/npc/1"), Screen::Zenith);
        assert_eq!(classify("#event/teamraid070/zenith/npc/1"), Screen::Zenith);
        assert_eq!(classify("#event/team_raid/zenith/npc/1"), Screen::Unrecognized);
        assert_eq!(classify("#list/detail_npc/1"), Screen::Artifact);
        assert_eq!(classify("#tower/party/top/detail_npc/1"), Screen::Artifact);
        assert_eq!(classify("#event/abc1/list/detail_npc/9"), Screen::Artifact);
        assert_eq!(classify("#mypage"), Screen::Unrecognized);
        assert_eq!(classify(""), Screen::Unrecognized);
    }
}
