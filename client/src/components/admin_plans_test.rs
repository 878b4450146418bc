use super::*;

fn filled() -> PlanDraft {
    PlanDraft {
        name: " Afya Bora ".to_owned(),
        description: "Family cover".to_owned(),
        category: "Family".to_owned(),
        daily: String::new(),
        weekly: "600".to_owned(),
        monthly: "2,400".to_owned(),
        annual: "26000".to_owned(),
        benefits: "Inpatient\n\n  Maternity  \n".to_owned(),
        coverage: "Inpatient: 500000\nOut patient : 50,000\n".to_owned(),
        is_active: true,
    }
}

#[test]
fn to_input_parses_every_field() {
    let input = filled().to_input().expect("valid draft");
    assert_eq!(input.name, "Afya Bora");
    assert_eq!(input.category, "family");
    assert_eq!(input.premiums.daily, 0.0);
    assert_eq!(input.premiums.monthly, 2400.0);
    assert_eq!(input.benefits, vec!["Inpatient".to_owned(), "Maternity".to_owned()]);
    assert_eq!(input.coverage_limits.get("inpatient"), Some(&500_000.0));
    assert_eq!(input.coverage_limits.get("out_patient"), Some(&50_000.0));
}

#[test]
fn to_input_requires_name() {
    let draft = PlanDraft { name: "  ".to_owned(), ..filled() };
    assert_eq!(draft.to_input(), Err("Plan name is required".to_owned()));
}

#[test]
fn to_input_requires_some_premium() {
    let draft = PlanDraft {
        weekly: String::new(),
        monthly: "0".to_owned(),
        annual: String::new(),
        ..filled()
    };
    assert_eq!(draft.to_input(), Err("Set a premium for at least one frequency".to_owned()));
}

#[test]
fn to_input_rejects_bad_premium() {
    let draft = PlanDraft { weekly: "-5".to_owned(), ..filled() };
    assert_eq!(draft.to_input(), Err("The weekly premium must be a non-negative amount".to_owned()));
}

#[test]
fn to_input_reports_bad_coverage_line() {
    let draft = PlanDraft { coverage: "inpatient: 1000\ndental".to_owned(), ..filled() };
    assert_eq!(draft.to_input(), Err("Coverage line 2 must look like \"inpatient: 500000\"".to_owned()));

    let draft = PlanDraft { coverage: "dental: lots".to_owned(), ..filled() };
    assert!(draft.to_input().is_err());
}

#[test]
fn from_plan_round_trips_through_the_editor() {
    let input = filled().to_input().expect("valid draft");
    let plan = Plan {
        id: "plan-1".to_owned(),
        name: input.name.clone(),
        description: input.description.clone(),
        category: input.category.clone(),
        premiums: input.premiums.clone(),
        benefits: input.benefits.clone(),
        coverage_limits: input.coverage_limits.clone(),
        is_active: false,
    };

    let draft = PlanDraft::from_plan(&plan);
    assert_eq!(draft.daily, "");
    assert_eq!(draft.monthly, "2400");
    assert_eq!(draft.benefits, "Inpatient\nMaternity");
    assert_eq!(draft.coverage, "inpatient: 500000\nout_patient: 50000");
    assert!(!draft.is_active);
    assert_eq!(draft.to_input().expect("still valid").coverage_limits, plan.coverage_limits);
}

#[test]
fn new_plan_defaults_to_visible() {
    assert!(PlanDraft::new_plan().is_active);
}
