// uo-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn dt_kelvin(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn square_meters(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

pub mod constants {
    /// Standard gravity, m/s².
    pub const G0_MPS2: f64 = 9.806_65;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _dt = dt_kelvin(70.0);
        let _a = square_meters(10.0);
    }

    #[test]
    fn celsius_converts_to_kelvin() {
        let t = celsius(25.0);
        assert!((t.value - 298.15).abs() < 1e-9);
    }
}
