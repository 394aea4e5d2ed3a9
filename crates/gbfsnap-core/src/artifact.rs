use tracing::debug;

use crate::dom::{self, PageDom};
use crate::error::ExtractError;
use crate::host::{self, HostState};
use crate::record::{Artifact, ArtifactSkill, ArtifactSnapshot, SchemaVersion};

pub fn extract_artifact<S, D>(
    state: &S,
    dom: &D,
    ver: SchemaVersion,
) -> Result<ArtifactSnapshot, ExtractError>
where
    S: HostState + ?Sized,
    D: PageDom + ?Sized,
{
    let game = host::game(state);
    let lang = game.get("lang")?.to_value();
    let id = game.at(&["view", "npcId"])?.parse_int();
    let artifact = scrape(dom).unwrap_or_else(|e| {
        debug!(error = %e, "artifact scrape failed, exporting no artifact");
        Artifact::default()
    });
    Ok(ArtifactSnapshot {
        ver,
        lang,
        id,
        artifact,
    })
}

/// All or nothing: a partially read artifact is dropped.
fn scrape<D: PageDom + ?Sized>(dom: &D) -> Result<Artifact, ExtractError> {
    let bodies = dom.get_elements_by_class_name(None, "artifact-body");
    let Some(&body) = bodies.first() else {
        return Ok(Artifact::default());
    };
    let icon = dom::first(
        &dom.get_elements_by_class_name(Some(body), "img-icon-body"),
        ".img-icon-body",
    )?;
    let img = dom.src(icon);

    let mut skills = Vec::new();
    for item in dom.get_elements_by_class_name(Some(body), "prt-artifact-skill-item") {
        let text_of = |class: &str| -> Result<String, ExtractError> {
            let el = dom::first(&dom.get_elements_by_class_name(Some(item), class), class)?;
            Ok(dom.text_content(el))
        };
        let icon_box = dom::first(
            &dom.get_elements_by_class_name(Some(item), "artifact-skill-icon"),
            ".artifact-skill-icon",
        )?;
        let icon_img = dom::first(
            &dom.get_elements_by_tag_name(icon_box, "img"),
            ".artifact-skill-icon img",
        )?;
        skills.push(ArtifactSkill {
            lvl: text_of("artifact-skill-level")?,
            icon: dom.src(icon_img).unwrap_or_default(),
            desc: text_of("artifact-skill-desc")?,
            value: text_of("artifact-skill-value")?,
        });
    }
    Ok(Artifact {
        img,
        skills: Some(skills),
    })
}
