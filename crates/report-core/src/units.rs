use serde::{Deserialize, Serialize};

const METER: f64 = 1.0;
const INCH: f64 = METER * 0.3048 / 12.0;
const ASTRONOMICAL_UNIT: f64 = METER * 149_597_870_700.0;

/// Host unit systems, numbered by the host's unit-system code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    None,
    Microns,
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Microinches,
    Mils,
    Inches,
    Feet,
    Miles,
    Custom,
    Angstroms,
    Nanometers,
    Decimeters,
    Dekameters,
    Hectometers,
    Megameters,
    Gigameters,
    Yards,
    PrinterPoints,
    PrinterPicas,
    NauticalMiles,
    AstronomicalUnits,
    LightYears,
    Parsecs,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 26] = [
        UnitSystem::None,
        UnitSystem::Microns,
        UnitSystem::Millimeters,
        UnitSystem::Centimeters,
        UnitSystem::Meters,
        UnitSystem::Kilometers,
        UnitSystem::Microinches,
        UnitSystem::Mils,
        UnitSystem::Inches,
        UnitSystem::Feet,
        UnitSystem::Miles,
        UnitSystem::Custom,
        UnitSystem::Angstroms,
        UnitSystem::Nanometers,
        UnitSystem::Decimeters,
        UnitSystem::Dekameters,
        UnitSystem::Hectometers,
        UnitSystem::Megameters,
        UnitSystem::Gigameters,
        UnitSystem::Yards,
        UnitSystem::PrinterPoints,
        UnitSystem::PrinterPicas,
        UnitSystem::NauticalMiles,
        UnitSystem::AstronomicalUnits,
        UnitSystem::LightYears,
        UnitSystem::Parsecs,
    ];

    pub fn from_code(code: i32) -> Option<UnitSystem> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Meters per model unit. `None` and `Custom` have no usable length and
    /// export unscaled.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            UnitSystem::None | UnitSystem::Custom => 1.0,
            UnitSystem::Microns => METER * 1.0e-6,
            UnitSystem::Millimeters => METER * 1.0e-3,
            UnitSystem::Centimeters => METER * 1.0e-2,
            UnitSystem::Meters => METER,
            UnitSystem::Kilometers => METER * 1.0e3,
            UnitSystem::Microinches => INCH * 1.0e-6,
            UnitSystem::Mils => INCH * 1.0e-3,
            UnitSystem::Inches => INCH,
            UnitSystem::Feet => INCH * 12.0,
            UnitSystem::Miles => INCH * 12.0 * 5280.0,
            UnitSystem::Angstroms => METER * 1.0e-10,
            UnitSystem::Nanometers => METER * 1.0e-9,
            UnitSystem::Decimeters => METER * 1.0e-1,
            UnitSystem::Dekameters => METER * 1.0e1,
            UnitSystem::Hectometers => METER * 1.0e2,
            UnitSystem::Megameters => METER * 1.0e6,
            UnitSystem::Gigameters => METER * 1.0e9,
            UnitSystem::Yards => INCH * 12.0 * 3.0,
            UnitSystem::PrinterPoints => INCH / 72.0,
            UnitSystem::PrinterPicas => INCH / 6.0,
            UnitSystem::NauticalMiles => METER * 1852.0,
            UnitSystem::AstronomicalUnits => ASTRONOMICAL_UNIT,
            UnitSystem::LightYears => METER * 9_460_730_472_580_800.0,
            UnitSystem::Parsecs => ASTRONOMICAL_UNIT * 648_000.0 / std::f64::consts::PI,
        }
    }
}

/// Multiplier converting one model unit of the document to one meter.
/// Unknown codes export unscaled.
pub fn resolve_scale(unit_system_code: i32) -> f64 {
    UnitSystem::from_code(unit_system_code)
        .map(UnitSystem::meters_per_unit)
        .unwrap_or(1.0)
}
