//! EMP (zenith) screen capture.
//!
//! The bonus list and ring data come from page state. Awakening, domain,
//! saint and extra bonuses are only rendered in the DOM, so they are scraped
//! in one pass that stops at the first missing element and keeps whatever it
//! had filled in by then.

use tracing::debug;

use crate::dom::{self, PageDom};
use crate::error::ExtractError;
use crate::host::{self, HostState};
use crate::record::{Awakening, BonusEntry, SchemaVersion, ZenithSnapshot};

pub fn extract_zenith<S, D>(
    state: &S,
    dom: &D,
    ver: SchemaVersion,
) -> Result<ZenithSnapshot, ExtractError>
where
    S: HostState + ?Sized,
    D: PageDom + ?Sized,
{
    let game = host::game(state);
    let view = game.get("view")?;
    let mut rec = ZenithSnapshot {
        ver,
        lang: game.get("lang")?.to_value(),
        id: view.get("npcId")?.parse_int(),
        emp: view
            .at(&["bonusListModel", "attributes", "bonus_list"])?
            .to_value(),
        ring: view.at(&["npcaugmentData", "param_data"])?.to_value(),
        awakening: None,
        awaktype: None,
        domain: Vec::new(),
        saint: Vec::new(),
        extra: Vec::new(),
    };
    if let Err(e) = scrape(dom, &mut rec) {
        debug!(error = %e, "zenith scrape stopped early");
    }
    Ok(rec)
}

fn scrape<D: PageDom + ?Sized>(dom: &D, rec: &mut ZenithSnapshot) -> Result<(), ExtractError> {
    let level = dom::first(
        &dom.get_elements_by_class_name(None, "prt-current-awakening-lv"),
        ".prt-current-awakening-lv",
    )?;
    let digits = dom.children(level);
    rec.awakening = match rec.ver {
        SchemaVersion::V1 => {
            let el = dom::first(&digits, ".prt-current-awakening-lv > *")?;
            Some(Awakening::ClassName(dom.class_name(el)))
        }
        SchemaVersion::V2 => {
            let classes: Vec<String> = digits.iter().map(|&d| dom.class_name(d)).collect();
            awakening_level(&classes).map(Awakening::Level)
        }
    };

    let form = dom::first(
        &dom.get_elements_by_class_name(None, "prt-arousal-form-info"),
        ".prt-arousal-form-info",
    )?;
    let label = dom::require_child(dom, form, 1, ".prt-arousal-form-info")?;
    rec.awaktype = Some(dom.text_content(label));

    let domains = dom
        .get_element_by_id("prt-domain-evoker-list")
        .ok_or_else(|| ExtractError::MissingElement("#prt-domain-evoker-list".into()))?;
    for detail in dom.get_elements_by_class_name(Some(domains), "prt-bonus-detail") {
        rec.domain.push(bonus_entry(dom, detail)?);
    }

    let shisei = dom
        .get_element_by_id("prt-shisei-wrapper")
        .ok_or_else(|| ExtractError::MissingElement("#prt-shisei-wrapper".into()))?;
    let gauges = dom.get_elements_by_class_name(Some(shisei), "prt-progress-gauge");
    if let Some(&gauge) = gauges.first() {
        for icon in dom.get_elements_by_class_name(Some(gauge), "ico-progress-gauge") {
            rec.saint
                .push(BonusEntry(dom.class_name(icon), None, None));
        }
        for detail in dom.get_elements_by_class_name(Some(shisei), "prt-bonus-detail") {
            rec.saint.push(bonus_entry(dom, detail)?);
        }
    }

    let extras = dom.get_elements_by_class_name(None, "cnt-extra-lb extra numbers");
    if let Some(&extra) = extras.first() {
        for detail in dom.get_elements_by_class_name(Some(extra), "prt-bonus-detail") {
            rec.extra.push(bonus_entry(dom, detail)?);
        }
    }
    Ok(())
}

/// `[children[0].className, children[1].textContent, children[2]?.textContent]`
fn bonus_entry<'a, D: PageDom + ?Sized>(
    dom: &'a D,
    detail: D::Element<'a>,
) -> Result<BonusEntry, ExtractError> {
    let icon = dom::require_child(dom, detail, 0, ".prt-bonus-detail")?;
    let label = dom::require_child(dom, detail, 1, ".prt-bonus-detail")?;
    let secondary = dom::child(dom, detail, 2).map(|el| dom.text_content(el));
    Ok(BonusEntry(
        dom.class_name(icon),
        Some(dom.text_content(label)),
        secondary,
    ))
}

/// Each digit element ends its class name with one digit, most significant
/// first. A class without a trailing digit makes the level unreadable.
pub fn awakening_level<S: AsRef<str>>(classes: &[S]) -> Option<u64> {
    classes.iter().try_fold(0u64, |acc, class| {
        let digit = class.as_ref().chars().last()?.to_digit(10)?;
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}
