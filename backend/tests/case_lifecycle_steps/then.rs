//! Then steps for case lifecycle BDD scenarios.

use casetrack::domain::ErrorKind;
use eyre::eyre;
use rstest_bdd_macros::then;

use super::world::CaseWorld;

#[then("the creation succeeds with matching audit timestamps")]
fn the_creation_succeeds(world: &mut CaseWorld) -> Result<(), eyre::Report> {
    let created = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre!("no creation result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("creation failed: {err}"))?;
    if created.created_date != created.updated_date {
        return Err(eyre!("audit timestamps differ at creation"));
    }
    Ok(())
}

#[then("the creation is rejected as a duplicate case number")]
fn the_creation_is_rejected_as_duplicate(world: &mut CaseWorld) -> Result<(), eyre::Report> {
    let error = match world.last_result.as_ref() {
        Some(Err(error)) => error,
        Some(Ok(_)) => return Err(eyre!("creation unexpectedly succeeded")),
        None => return Err(eyre!("no creation result in scenario world")),
    };
    if error.kind() != ErrorKind::Conflict {
        return Err(eyre!("expected a conflict, got {:?}", error.kind()));
    }
    if error.message() != "Case number already exists" {
        return Err(eyre!("unexpected conflict message: {}", error.message()));
    }
    Ok(())
}

#[then(r#"the fetched case keeps title "{title}""#)]
fn the_fetched_case_keeps_title(world: &mut CaseWorld, title: String) -> Result<(), eyre::Report> {
    let fetched = world
        .last_fetched
        .as_ref()
        .ok_or_else(|| eyre!("no fetch result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("fetch failed: {err}"))?;
    if fetched.title != title {
        return Err(eyre!("expected title {title:?}, got {:?}", fetched.title));
    }
    Ok(())
}

#[then(r#"the stored title remains "{title}" while the status becomes "{status}""#)]
fn the_stored_title_remains(
    world: &mut CaseWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let updated = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre!("no update result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("update failed: {err}"))?;
    if updated.title != title {
        return Err(eyre!("expected title {title:?}, got {:?}", updated.title));
    }
    if updated.status.as_str() != status {
        return Err(eyre!(
            "expected status {status:?}, got {:?}",
            updated.status.as_str()
        ));
    }
    Ok(())
}

#[then("the deletion succeeds")]
fn the_deletion_succeeds(world: &mut CaseWorld) -> Result<(), eyre::Report> {
    match world.last_delete.as_ref() {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre!("deletion failed: {err}")),
        None => Err(eyre!("no deletion result in scenario world")),
    }
}
