//! Property backend integration tests.
//!
//! Broad tolerances; the point is physical plausibility of the values the
//! humidifier sizing relies on.

use hf_fluids::{AshraePsychrometrics, If97Water, Psychrometrics, WaterProperties};

#[test]
fn steam_energy_per_kg_from_20c_feed() {
    let water = If97Water::new();
    let latent = water.latent_heat(100.0).unwrap();
    let cp_avg = water.average_specific_heat(100.0, 20.0).unwrap();
    let per_kg = latent + cp_avg * (100.0 - 20.0);

    // Roughly 2.59 MJ/kg to boil water fed at 20 °C
    assert!(per_kg > 2.55e6 && per_kg < 2.62e6, "per_kg = {per_kg}");
}

#[test]
fn saturation_is_reached_by_adding_moisture() {
    let psy = AshraePsychrometrics::new();
    let pb = 101_325.0;
    let w_sat = psy.hum_rat_from_tdb_rh_pb(20.0, 1.0, pb);
    let w_half = psy.hum_rat_from_tdb_rh_pb(20.0, 0.5, pb);
    assert!(w_half < w_sat);
    assert!(w_half > 0.45 * w_sat && w_half < 0.55 * w_sat);
}

#[test]
fn water_density_falls_with_temperature() {
    let psy = AshraePsychrometrics::new();
    let cold = psy.rho_water(5.05);
    let warm = psy.rho_water(20.0);
    assert!(warm < cold);
    assert!((warm - 998.2).abs() < 1.0, "rho(20) = {warm}");
}
