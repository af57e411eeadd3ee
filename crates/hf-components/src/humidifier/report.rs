//! Report variables published by humidifiers.

use hf_sim::{MeterResource, OutputRegistry, StoreType};

use super::model::{Humidifier, HumidifierKind};

/// Quantity behind a registered report variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    WaterConsRate,
    WaterCons,
    TankSupplyVdot,
    TankSupplyVol,
    StarvedSupplyVdot,
    StarvedSupplyVol,
    /// Mains water: starved volume for tank-fed units, all water otherwise.
    MainsWaterVol,
    ElecUseRate,
    ElecUseEnergy,
    ThermalEff,
    GasUseRate,
    GasUseEnergy,
    AuxElecUseRate,
    AuxElecUseEnergy,
}

struct Spec {
    name: &'static str,
    units: &'static str,
    store: StoreType,
    meter: Option<(&'static str, &'static str)>,
    field: ReportField,
}

const fn avg(name: &'static str, units: &'static str, field: ReportField) -> Spec {
    Spec {
        name,
        units,
        store: StoreType::Average,
        meter: None,
        field,
    }
}

const fn sum(
    name: &'static str,
    meter: Option<(&'static str, &'static str)>,
    units: &'static str,
    field: ReportField,
) -> Spec {
    Spec {
        name,
        units,
        store: StoreType::Sum,
        meter,
        field,
    }
}

fn specs(h: &Humidifier) -> Vec<Spec> {
    use ReportField::*;
    let mut out = Vec::new();
    if h.water_tank.is_some() {
        out.extend([
            avg("Humidifier Water Volume Flow Rate", "m3/s", WaterConsRate),
            sum("Humidifier Water Volume", None, "m3", WaterCons),
            avg(
                "Humidifier Storage Tank Water Volume Flow Rate",
                "m3/s",
                TankSupplyVdot,
            ),
            sum(
                "Humidifier Storage Tank Water Volume",
                Some(("Water", "SYSTEM")),
                "m3",
                TankSupplyVol,
            ),
            avg(
                "Humidifier Starved Storage Tank Water Volume Flow Rate",
                "m3/s",
                StarvedSupplyVdot,
            ),
            sum(
                "Humidifier Starved Storage Tank Water Volume",
                Some(("Water", "SYSTEM")),
                "m3",
                StarvedSupplyVol,
            ),
            sum(
                "Humidifier Mains Water Volume",
                Some(("MainsWater", "SYSTEM")),
                "m3",
                MainsWaterVol,
            ),
        ]);
    } else {
        out.extend([
            avg("Humidifier Water Volume Flow Rate", "m3/s", WaterConsRate),
            sum(
                "Humidifier Water Volume",
                Some(("WATER", "System")),
                "m3",
                WaterCons,
            ),
            sum(
                "Humidifier Mains Water Volume",
                Some(("MAINSWATER", "System")),
                "m3",
                MainsWaterVol,
            ),
        ]);
    }
    match h.kind {
        HumidifierKind::ElectricSteam(_) => out.extend([
            avg("Humidifier Electric Power", "W", ElecUseRate),
            sum(
                "Humidifier Electric Energy",
                Some(("ELECTRICITY", "System")),
                "J",
                ElecUseEnergy,
            ),
        ]),
        HumidifierKind::GasSteam(_) => out.extend([
            avg("Humidifier Gas Use Thermal Efficiency", "", ThermalEff),
            avg("Humidifier Gas Use Rate", "W", GasUseRate),
            sum(
                "Humidifier Gas Use Energy",
                Some(("GAS", "System")),
                "J",
                GasUseEnergy,
            ),
            avg("Humidifier Auxiliary Electric Power", "W", AuxElecUseRate),
            sum(
                "Humidifier Auxiliary Electric Energy",
                Some(("ELECTRICITY", "System")),
                "J",
                AuxElecUseEnergy,
            ),
        ]),
    }
    out
}

impl Humidifier {
    /// Register this unit's report variables.
    pub(crate) fn setup_report_variables(&mut self, outputs: &mut OutputRegistry) {
        self.reports = specs(self)
            .into_iter()
            .map(|s| {
                let meter = s
                    .meter
                    .map(|(resource, group)| MeterResource::new(resource, "HUMIDIFIER", group));
                let handle = outputs.setup_output_variable(s.name, s.units, &self.name, s.store, meter);
                (s.field, handle)
            })
            .collect();
    }

    /// Current value of a report quantity.
    pub fn report_value(&self, field: ReportField) -> f64 {
        use ReportField::*;
        let w = &self.water;
        match field {
            WaterConsRate => w.cons_rate,
            WaterCons => w.cons,
            TankSupplyVdot => w.tank_supply_vdot,
            TankSupplyVol => w.tank_supply_vol,
            StarvedSupplyVdot => w.starved_supply_vdot,
            StarvedSupplyVol => w.starved_supply_vol,
            MainsWaterVol => {
                if self.water_tank.is_some() {
                    w.starved_supply_vol
                } else {
                    w.cons
                }
            }
            ElecUseRate => match &self.kind {
                HumidifierKind::ElectricSteam(e) => e.elec_use_rate,
                HumidifierKind::GasSteam(_) => 0.0,
            },
            ElecUseEnergy => match &self.kind {
                HumidifierKind::ElectricSteam(e) => e.elec_use_energy,
                HumidifierKind::GasSteam(_) => 0.0,
            },
            ThermalEff => self.gas().map_or(0.0, |g| g.thermal_eff),
            GasUseRate => self.gas().map_or(0.0, |g| g.gas_use_rate),
            GasUseEnergy => self.gas().map_or(0.0, |g| g.gas_use_energy),
            AuxElecUseRate => self.gas().map_or(0.0, |g| g.aux_elec_use_rate),
            AuxElecUseEnergy => self.gas().map_or(0.0, |g| g.aux_elec_use_energy),
        }
    }

    /// Push current values to the registry.
    pub(crate) fn publish(&self, outputs: &mut OutputRegistry) {
        for &(field, handle) in &self.reports {
            outputs.set(handle, self.report_value(field));
        }
    }

    fn gas(&self) -> Option<&super::model::GasSteam> {
        match &self.kind {
            HumidifierKind::GasSteam(g) => Some(g),
            HumidifierKind::ElectricSteam(_) => None,
        }
    }
}
