//! Given steps for case lifecycle BDD scenarios.

use casetrack::domain::ports::CaseService;
use eyre::WrapErr;
use rstest_bdd_macros::given;

use super::world::{CaseWorld, build_candidate, run_async};

#[given("an empty case store")]
fn an_empty_case_store(world: &mut CaseWorld) {
    let _ = world;
}

#[given(r#"a stored case numbered "{number}" titled "{title}""#)]
fn a_stored_case(world: &mut CaseWorld, number: String, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_case(build_candidate(&number, &title)))
        .wrap_err("create case for scenario setup")?;
    world.stored = Some(created);
    Ok(())
}
