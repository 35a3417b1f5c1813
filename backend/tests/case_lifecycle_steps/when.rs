//! When steps for case lifecycle BDD scenarios.

use std::str::FromStr;

use casetrack::domain::ports::CaseService;
use casetrack::domain::{CasePatch, CaseStatus};
use eyre::eyre;
use rstest_bdd_macros::when;

use super::world::{CaseWorld, build_candidate, run_async};

#[when(r#"the client creates a case numbered "{number}" titled "{title}""#)]
fn the_client_creates_a_case(world: &mut CaseWorld, number: String, title: String) {
    let result = run_async(world.service.create_case(build_candidate(&number, &title)));
    world.last_result = Some(result);
}

#[when("the client fetches the created case by id")]
fn the_client_fetches_the_created_case(world: &mut CaseWorld) -> Result<(), eyre::Report> {
    let created = world
        .last_result
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .ok_or_else(|| eyre!("no created case in scenario world"))?;
    let id = created.id.to_string();
    let fetched = run_async(world.service.get_case_by_id(&id));
    world.last_fetched = Some(fetched);
    Ok(())
}

#[when(r#"the client updates the stored case with a blank title and status "{status}""#)]
fn the_client_updates_with_blank_title(
    world: &mut CaseWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let stored = world
        .stored
        .as_ref()
        .ok_or_else(|| eyre!("no stored case in scenario world"))?;
    let id = stored.id.to_string();
    let patch = CasePatch {
        title: Some(String::new()),
        status: Some(CaseStatus::from_str(&status)?),
        ..CasePatch::default()
    };
    let result = run_async(world.service.update_case(patch, &id));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the client deletes the case with id "{id}""#)]
fn the_client_deletes_the_case(world: &mut CaseWorld, id: String) {
    let result = run_async(world.service.delete_case_by_id(&id));
    world.last_delete = Some(result);
}
