use hf_project::schema::*;
use hf_project::{ValidationError, from_yaml_str, validate_project};

const BASE: &str = r#"
version: 1
name: Test
schedules:
  - name: "On"
    kind: { type: Constant, value: 1.0 }
curves:
  - name: Eff
    form: { type: Linear, c0: 1.0, c1: 0.0 }
water_tanks:
  - name: Tank
    capacity_m3: 1.0
    initial_volume_m3: 0.5
humidifiers:
  - name: H1
    kind: { type: ElectricSteam }
    availability_schedule: "on"
    nominal_capacity_m3ps: 1.0e-6
    rated_power_w: autosize
    air_inlet_node: A
    air_outlet_node: B
  - name: G1
    kind: { type: GasSteam, efficiency_curve: EFF }
    nominal_capacity_m3ps: Autosize
    rated_power_w: 2000
    air_inlet_node: C
    air_outlet_node: D
    water_storage_tank: tank
"#;

fn base() -> Project {
    from_yaml_str(BASE).unwrap()
}

#[test]
fn base_project_is_valid() {
    let project = base();
    assert_eq!(project.humidifiers.len(), 2);
    assert_eq!(project.run, RunDef::default());
}

#[test]
fn duplicate_humidifier_names_ignore_case() {
    let mut project = base();
    project.humidifiers[1].name = "h1".to_string();
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn missing_references() {
    let mut project = base();
    project.humidifiers[0].availability_schedule = Some("Nights".to_string());
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::MissingReference { id, .. }) if id == "Nights"
    ));

    let mut project = base();
    project.humidifiers[1].water_storage_tank = Some("Cistern".to_string());
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::MissingReference { .. })
    ));

    let mut project = base();
    project.sizing = Some(SizingDef {
        target: SizingTargetDef::AirLoop {
            system: 0,
            outdoor_air: false,
            duct: DuctDef::Main,
        },
        ..Default::default()
    });
    assert!(validate_project(&project).is_err());
}

#[test]
fn rejects_bad_numbers() {
    let mut project = base();
    project.humidifiers[0].fan_power_w = -1.0;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::InvalidValue { .. })
    ));

    let mut project = base();
    project.humidifiers[0].nominal_capacity_m3ps = Autosizable::Value(-1e-6);
    assert!(validate_project(&project).is_err());

    let mut project = base();
    project.humidifiers[1].kind = HumidifierKindDef::GasSteam {
        thermal_efficiency: 1.2,
        efficiency_curve: None,
        inlet_water_temperature_option: None,
    };
    assert!(validate_project(&project).is_err());

    let mut project = base();
    project.humidifiers[0].air_outlet_node = "a".to_string();
    assert!(validate_project(&project).is_err());

    let mut project = base();
    project.schedules[0].kind = ScheduleKindDef::Hourly { values: vec![1.0; 12] };
    assert!(validate_project(&project).is_err());

    let mut project = base();
    project.timestep.system_s = 0.0;
    assert!(validate_project(&project).is_err());
}

#[test]
fn rejects_future_version() {
    let mut project = base();
    project.version = 99;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::UnsupportedVersion { version: 99 })
    ));
}

#[test]
fn demo_project_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/office_humidifiers.yaml");
    let project = hf_project::load_project(&path).unwrap();
    assert_eq!(project.humidifiers.len(), 2);
    assert_eq!(project.water_tanks.len(), 1);
    assert!(project.humidifiers[0].rated_power_w.is_autosize());
}
