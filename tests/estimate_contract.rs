use serde_json::Value;
use site_estimator::{
    EstimateError, Estimator, InputField, ProjectInput, Role, estimate, parse_floor_spec,
};

fn reference_json() -> Value {
    estimate(1000.0, "G+1", 500.0, 2000.0)
        .unwrap()
        .to_json()
        .unwrap()
}

#[test]
fn end_to_end_reference_scenario() {
    let bundle = estimate(1000.0, "G+1", 500.0, 2000.0).unwrap();

    assert_eq!(bundle.total_floors, 2);
    assert_eq!(bundle.total_area, 2000.0);
    assert_eq!(bundle.workers, 11);

    let expected = [
        (Role::Mason, 2),
        (Role::Helper, 3),
        (Role::SteelWorker, 1),
        (Role::Carpenter, 1),
        (Role::Electrician, 1),
        (Role::Plumber, 1),
        (Role::Supervisor, 2),
    ];
    for (role, count) in expected {
        assert_eq!(bundle.workforce.count(role), count, "{role:?}");
    }

    assert_eq!(bundle.duration_days, 181);
    assert_eq!(bundle.labor_cost(), 995_500.0);
    assert_eq!(bundle.material_cost(), 4_000_000.0);
    assert_eq!(bundle.total_cost(), 4_995_500.0);

    assert_eq!(bundle.materials.cement_bags, 800);
    assert_eq!(bundle.materials.steel_kg, 8000);
    assert_eq!(bundle.materials.sand_tons, 1000);
    assert_eq!(bundle.materials.bricks, 16000);
}

#[test]
fn wire_field_names_are_stable() {
    let json = reference_json();

    for key in [
        "workers",
        "worker_breakdown",
        "duration_days",
        "labor_cost",
        "material_cost",
        "total_cost",
        "materials",
        "weekly_schedule",
        "floorplan",
        "floorplan_layout",
        "alternative_plans",
        "sustainability_options",
        "material_delivery",
        "timeline",
        "explanations",
        "warnings",
    ] {
        assert!(json.get(key).is_some(), "missing `{key}`");
    }

    for role in [
        "masons",
        "helpers",
        "steel_workers",
        "carpenters",
        "electricians",
        "plumbers",
        "supervisors",
    ] {
        let entry = &json["worker_breakdown"][role];
        assert!(entry["count"].is_u64(), "{role} count");
        assert!(entry["duty"].is_string(), "{role} duty");
    }

    for key in ["cement_bags", "steel_kg", "sand_tons", "bricks"] {
        assert!(json["materials"][key].is_u64(), "materials.{key}");
    }

    assert_eq!(json["weekly_schedule"].as_array().unwrap().len(), 8);
    assert_eq!(json["material_delivery"].as_array().unwrap().len(), 8);
    assert_eq!(json["alternative_plans"].as_array().unwrap().len(), 4);
    assert_eq!(json["timeline"].as_array().unwrap().len(), 7);
    assert!(!json["sustainability_options"].as_array().unwrap().is_empty());
    assert!(json["floorplan"].is_null());
    assert!(json["explanations"]["duration"].as_str().unwrap().contains("181"));
}

#[test]
fn schedule_entries_carry_week_task_and_head_count() {
    let json = reference_json();
    let first = &json["weekly_schedule"][0];
    assert_eq!(first["week"], 1);
    assert!(first["task"].is_string());
    assert!(first["materials"].is_string());
    assert_eq!(first["workers"], 5);
    assert_eq!(first["crew"][0], "helper");

    let delivery = &json["material_delivery"][1];
    assert_eq!(delivery["week"], 2);
    assert_eq!(delivery["items"][0]["material"], "cement");
    assert_eq!(delivery["items"][0]["quantity"], 160);
}

#[test]
fn timeline_is_independent_of_inputs() {
    let small = estimate(50.0, "G", 100.0, 100.0).unwrap();
    let large = estimate(9000.0, "G+6", 900.0, 3000.0).unwrap();
    assert_eq!(small.timeline, large.timeline);
    assert_eq!(small.sustainability_options, large.sustainability_options);
}

#[test]
fn invalid_area_returns_no_bundle() {
    let err = Estimator::with_default()
        .estimate_raw("abc", "G+1", "500", "2000")
        .unwrap_err();
    match err {
        EstimateError::InvalidInput(invalid) => {
            assert_eq!(invalid.field, InputField::Area);
            assert_eq!(invalid.field.to_string(), "area");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn degenerate_sizes_use_the_same_error_kind() {
    for (area, floors) in [(0.0, "G+1"), (-10.0, "2"), (100.0, "0")] {
        let err = estimate(area, floors, 500.0, 2000.0).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput(_)), "{area} {floors}");
    }
}

#[test]
fn floor_spec_conventions() {
    assert_eq!(parse_floor_spec("G+2").unwrap(), 3);
    assert_eq!(parse_floor_spec("3").unwrap(), 3);
    assert_eq!(parse_floor_spec("G").unwrap(), 1);
    assert_eq!(
        parse_floor_spec("G+").unwrap_err().field,
        InputField::Floors
    );
}

#[test]
fn variants_do_not_touch_the_base_plan() {
    let input = ProjectInput::new(3000.0, "G+2", 600.0, 1800.0).unwrap();
    let bundle = Estimator::with_default().estimate(&input);
    let balanced = bundle
        .alternative_plans
        .iter()
        .find(|plan| plan.name == "Balanced")
        .unwrap();

    assert_eq!(balanced.workers, bundle.workers);
    assert_eq!(balanced.duration_days, bundle.duration_days);
    assert_eq!(balanced.total_cost, bundle.total_cost());

    let fast = &bundle.alternative_plans[0];
    assert!(fast.workers > bundle.workers);
    assert!(fast.duration_days < bundle.duration_days);
}
