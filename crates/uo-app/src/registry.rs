//! Static tool registry.
//!
//! Every calculator is a `ToolId` resolved at compile time to a
//! `ToolDescriptor`: its suite, title, declared scalar parameters, and an
//! adapter from the generic `Inputs` map into the typed evaluator. Tools
//! whose inputs are tables (blend, transport, fits, anomaly detection) are
//! driven through their own service entry points instead.

use uo_core::{EvalError, EvalResult, FormulaResult, Inputs, ParamSpec};
use uo_epi::{BetaSchedule, SeirParams, SimSpec, basic_r0, simulate};
use uo_heat::{
    CompositeWall, FilmCondensation, FlowArrangement, Lmtd, LumpedHeating, NtuEffectiveness,
    NucleateBoiling, SlabConduction, TransientSlab, overall_coefficient,
    wall::Layer,
};
use uo_mass::{
    DryingTime, FicksFlux, GasDiffusionLoss, MassTransferCoefficient, PackedAbsorber,
    SherwoodCorrelation, fuller_gas_diffusivity, wilke_chang_result,
};
use uo_petro::CatalystDecayFit;
use uo_thermo::{CombustionEfficiency, EnergyEfficiency, Fuel, FuelEmissions};

/// Calculator suite a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    Heat,
    Mass,
    Thermo,
    Epidemic,
    Petroleum,
}

impl Suite {
    pub fn name(&self) -> &'static str {
        match self {
            Suite::Heat => "heat",
            Suite::Mass => "mass",
            Suite::Thermo => "thermo",
            Suite::Epidemic => "epidemic",
            Suite::Petroleum => "petroleum",
        }
    }
}

/// Every scalar calculator in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolId {
    WallHeatLoss,
    SlabConduction,
    OverallCoefficient,
    LogMeanTempDifference,
    HxEffectivenessParallel,
    HxEffectivenessCounter,
    FilmCondensation,
    NucleateBoiling,
    LumpedHeating,
    TransientSlab,
    FicksFlux,
    GasDiffusionLoss,
    WilkeChangDiffusivity,
    FullerDiffusivity,
    MassTransferDittusBoelter,
    MassTransferSiederTate,
    GasAbsorber,
    DryingTime,
    EnergyEfficiency,
    CombustionEfficiency,
    FuelEmissions,
    SeirOutbreak,
    BasicReproductionNumber,
    CatalystReplacement,
}

/// Compile-time description of one tool.
pub struct ToolDescriptor {
    pub id: ToolId,
    pub suite: Suite,
    /// Stable snake_case identifier used by the CLI and the result log
    pub name: &'static str,
    pub title: &'static str,
    pub params: &'static [ParamSpec],
    pub eval: fn(&Inputs) -> EvalResult<FormulaResult>,
}

pub const ALL_TOOLS: &[ToolId] = &[
    ToolId::WallHeatLoss,
    ToolId::SlabConduction,
    ToolId::OverallCoefficient,
    ToolId::LogMeanTempDifference,
    ToolId::HxEffectivenessParallel,
    ToolId::HxEffectivenessCounter,
    ToolId::FilmCondensation,
    ToolId::NucleateBoiling,
    ToolId::LumpedHeating,
    ToolId::TransientSlab,
    ToolId::FicksFlux,
    ToolId::GasDiffusionLoss,
    ToolId::WilkeChangDiffusivity,
    ToolId::FullerDiffusivity,
    ToolId::MassTransferDittusBoelter,
    ToolId::MassTransferSiederTate,
    ToolId::GasAbsorber,
    ToolId::DryingTime,
    ToolId::EnergyEfficiency,
    ToolId::CombustionEfficiency,
    ToolId::FuelEmissions,
    ToolId::SeirOutbreak,
    ToolId::BasicReproductionNumber,
    ToolId::CatalystReplacement,
];

impl ToolId {
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_TOOLS
            .iter()
            .copied()
            .find(|id| id.descriptor().name == name)
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        match self {
            ToolId::WallHeatLoss => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "wall_heat_loss",
                title: "Composite Wall Heat Loss",
                params: WALL_PARAMS,
                eval: eval_wall,
            },
            ToolId::SlabConduction => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "slab_conduction",
                title: "Steady Slab Conduction",
                params: SLAB_PARAMS,
                eval: eval_slab,
            },
            ToolId::OverallCoefficient => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "overall_coefficient",
                title: "Overall Heat-Transfer Coefficient",
                params: OVERALL_PARAMS,
                eval: eval_overall,
            },
            ToolId::LogMeanTempDifference => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "lmtd",
                title: "Log-Mean Temperature Difference",
                params: LMTD_PARAMS,
                eval: eval_lmtd,
            },
            ToolId::HxEffectivenessParallel => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "hx_effectiveness_parallel",
                title: "Exchanger Effectiveness (Parallel Flow)",
                params: HX_PARAMS,
                eval: eval_hx_parallel,
            },
            ToolId::HxEffectivenessCounter => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "hx_effectiveness_counter",
                title: "Exchanger Effectiveness (Counter Flow)",
                params: HX_PARAMS,
                eval: eval_hx_counter,
            },
            ToolId::FilmCondensation => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "film_condensation",
                title: "Film Condensation Coefficient",
                params: CONDENSATION_PARAMS,
                eval: eval_condensation,
            },
            ToolId::NucleateBoiling => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "nucleate_boiling",
                title: "Nucleate Boiling Superheat",
                params: BOILING_PARAMS,
                eval: eval_boiling,
            },
            ToolId::LumpedHeating => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "lumped_heating",
                title: "Lumped-Capacitance Heating Time",
                params: LUMPED_PARAMS,
                eval: eval_lumped,
            },
            ToolId::TransientSlab => ToolDescriptor {
                id: *self,
                suite: Suite::Heat,
                name: "transient_slab",
                title: "Transient Slab Conduction",
                params: TRANSIENT_PARAMS,
                eval: eval_transient,
            },
            ToolId::FicksFlux => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "ficks_flux",
                title: "Fick's-Law Diffusion Flux",
                params: FICKS_PARAMS,
                eval: eval_ficks,
            },
            ToolId::GasDiffusionLoss => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "gas_diffusion_loss",
                title: "Gas Loss Through a Leak Path",
                params: GAS_LOSS_PARAMS,
                eval: eval_gas_loss,
            },
            ToolId::WilkeChangDiffusivity => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "wilke_chang",
                title: "Wilke-Chang Liquid Diffusivity",
                params: WILKE_PARAMS,
                eval: eval_wilke,
            },
            ToolId::FullerDiffusivity => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "fuller_diffusivity",
                title: "Fuller Gas Diffusivity",
                params: FULLER_PARAMS,
                eval: eval_fuller,
            },
            ToolId::MassTransferDittusBoelter => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "mass_transfer_dittus_boelter",
                title: "Mass-Transfer Coefficient (Dittus-Boelter)",
                params: KC_PARAMS,
                eval: eval_kc_dittus,
            },
            ToolId::MassTransferSiederTate => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "mass_transfer_sieder_tate",
                title: "Mass-Transfer Coefficient (Sieder-Tate)",
                params: KC_PARAMS,
                eval: eval_kc_sieder,
            },
            ToolId::GasAbsorber => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "gas_absorber",
                title: "Packed Gas Absorber Sizing",
                params: ABSORBER_PARAMS,
                eval: eval_absorber,
            },
            ToolId::DryingTime => ToolDescriptor {
                id: *self,
                suite: Suite::Mass,
                name: "drying_time",
                title: "Batch Drying Time",
                params: DRYING_PARAMS,
                eval: eval_drying,
            },
            ToolId::EnergyEfficiency => ToolDescriptor {
                id: *self,
                suite: Suite::Thermo,
                name: "energy_efficiency",
                title: "Unit Energy Efficiency",
                params: EFFICIENCY_PARAMS,
                eval: eval_efficiency,
            },
            ToolId::CombustionEfficiency => ToolDescriptor {
                id: *self,
                suite: Suite::Thermo,
                name: "combustion_efficiency",
                title: "Combustion Efficiency vs AFR",
                params: COMBUSTION_PARAMS,
                eval: eval_combustion,
            },
            ToolId::FuelEmissions => ToolDescriptor {
                id: *self,
                suite: Suite::Thermo,
                name: "fuel_emissions",
                title: "Furnace Emission Rates",
                params: EMISSIONS_PARAMS,
                eval: eval_emissions,
            },
            ToolId::SeirOutbreak => ToolDescriptor {
                id: *self,
                suite: Suite::Epidemic,
                name: "seir_outbreak",
                title: "SEIR Outbreak Summary",
                params: SEIR_PARAMS,
                eval: eval_seir,
            },
            ToolId::BasicReproductionNumber => ToolDescriptor {
                id: *self,
                suite: Suite::Epidemic,
                name: "basic_r0",
                title: "Basic Reproduction Number",
                params: R0_PARAMS,
                eval: eval_r0,
            },
            ToolId::CatalystReplacement => ToolDescriptor {
                id: *self,
                suite: Suite::Petroleum,
                name: "catalyst_replacement",
                title: "Catalyst Replacement Time",
                params: CATALYST_PARAMS,
                eval: eval_catalyst,
            },
        }
    }
}

const WALL_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("layer1_thickness", "m", 1e-4, 5.0, 0.1),
    ParamSpec::new("layer1_conductivity", "W/(m*K)", 1e-3, 500.0, 1.0),
    ParamSpec::new("layer2_thickness", "m", 0.0, 5.0, 0.2),
    ParamSpec::new("layer2_conductivity", "W/(m*K)", 1e-3, 500.0, 1.0),
    ParamSpec::new("delta_t", "K", 0.1, 2000.0, 70.0),
    ParamSpec::new("area", "m2", 1e-3, 1e4, 10.0),
];

fn eval_wall(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let mut layers = vec![Layer {
        thickness: inputs.get("layer1_thickness")?,
        conductivity: inputs.get("layer1_conductivity")?,
    }];
    // A zero second thickness collapses to a single-layer wall.
    let l2 = inputs.get("layer2_thickness")?;
    if l2 > 0.0 {
        layers.push(Layer {
            thickness: l2,
            conductivity: inputs.get("layer2_conductivity")?,
        });
    }
    CompositeWall {
        layers,
        delta_t: uo_core::units::dt_kelvin(inputs.get("delta_t")?),
        area: uo_core::units::square_meters(inputs.get("area")?),
    }
    .evaluate()
}

const SLAB_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("conductivity", "W/(m*K)", 1e-3, 500.0, 0.6),
    ParamSpec::new("area", "m2", 1e-4, 1e4, 1.0),
    ParamSpec::new("thickness", "m", 1e-4, 5.0, 0.01),
    ParamSpec::new("delta_t", "K", 0.1, 2000.0, 75.0),
];

fn eval_slab(inputs: &Inputs) -> EvalResult<FormulaResult> {
    SlabConduction {
        conductivity: inputs.get("conductivity")?,
        area: uo_core::units::square_meters(inputs.get("area")?),
        thickness: inputs.get("thickness")?,
        delta_t: uo_core::units::dt_kelvin(inputs.get("delta_t")?),
    }
    .evaluate()
}

const OVERALL_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("resistance_1", "m2*K/W", 1e-6, 100.0, 0.1),
    ParamSpec::new("resistance_2", "m2*K/W", 0.0, 100.0, 0.1),
    ParamSpec::new("resistance_3", "m2*K/W", 0.0, 100.0, 0.0),
    ParamSpec::new("area", "m2", 1e-4, 1e4, 2.0),
];

fn eval_overall(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let mut resistances = vec![inputs.get("resistance_1")?];
    for name in ["resistance_2", "resistance_3"] {
        let r = inputs.get(name)?;
        if r > 0.0 {
            resistances.push(r);
        }
    }
    overall_coefficient(&resistances, inputs.get("area")?)
}

const LMTD_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("delta_t1", "K", 0.01, 2000.0, 50.0),
    ParamSpec::new("delta_t2", "K", 0.01, 2000.0, 30.0),
];

fn eval_lmtd(inputs: &Inputs) -> EvalResult<FormulaResult> {
    Lmtd {
        delta_t1: inputs.get("delta_t1")?,
        delta_t2: inputs.get("delta_t2")?,
    }
    .evaluate()
}

const HX_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("c_min", "W/K", 1e-3, 1e7, 500.0),
    ParamSpec::new("c_max", "W/K", 1e-3, 1e7, 1000.0),
    ParamSpec::new("ntu", "-", 1e-3, 50.0, 2.5),
];

fn eval_hx(inputs: &Inputs, arrangement: FlowArrangement) -> EvalResult<FormulaResult> {
    NtuEffectiveness {
        arrangement,
        c_min: inputs.get("c_min")?,
        c_max: inputs.get("c_max")?,
        ntu: inputs.get("ntu")?,
    }
    .evaluate()
}

fn eval_hx_parallel(inputs: &Inputs) -> EvalResult<FormulaResult> {
    eval_hx(inputs, FlowArrangement::Parallel)
}

fn eval_hx_counter(inputs: &Inputs) -> EvalResult<FormulaResult> {
    eval_hx(inputs, FlowArrangement::Counter)
}

const CONDENSATION_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("height", "m", 1e-3, 50.0, 0.5),
    ParamSpec::new("rho_liquid", "kg/m3", 1.0, 5000.0, 1000.0),
    ParamSpec::new("mu_liquid", "Pa*s", 1e-6, 10.0, 0.001),
    ParamSpec::new("k_liquid", "W/(m*K)", 1e-3, 10.0, 0.6),
    ParamSpec::new("h_fg", "J/kg", 1e3, 1e8, 2.25e6),
    ParamSpec::new("t_surface", "C", -100.0, 1000.0, 30.0),
    ParamSpec::new("t_saturation", "C", -100.0, 1000.0, 100.0),
];

fn eval_condensation(inputs: &Inputs) -> EvalResult<FormulaResult> {
    FilmCondensation {
        height: inputs.get("height")?,
        rho_liquid: inputs.get("rho_liquid")?,
        mu_liquid: inputs.get("mu_liquid")?,
        k_liquid: inputs.get("k_liquid")?,
        h_fg: inputs.get("h_fg")?,
        t_surface: uo_core::units::celsius(inputs.get("t_surface")?),
        t_saturation: uo_core::units::celsius(inputs.get("t_saturation")?),
    }
    .evaluate()
}

const BOILING_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("heat_flux", "W/m2", 1.0, 1e8, 1e5),
    ParamSpec::new("h_fg", "J/kg", 1e3, 1e8, 2.26e6),
    ParamSpec::new("cp_liquid", "J/(kg*K)", 100.0, 2e4, 4180.0),
    ParamSpec::new("mu_liquid", "Pa*s", 1e-6, 10.0, 0.001),
    ParamSpec::new("surface_tension", "N/m", 1e-4, 1.0, 0.072),
    ParamSpec::new("rho_liquid", "kg/m3", 1.0, 5000.0, 997.0),
    ParamSpec::new("rho_vapor", "kg/m3", 1e-3, 1000.0, 0.6),
    ParamSpec::new("c_sf", "-", 1e-3, 0.1, 0.013),
    ParamSpec::new("exponent", "-", 0.5, 3.0, 1.7),
];

fn eval_boiling(inputs: &Inputs) -> EvalResult<FormulaResult> {
    NucleateBoiling {
        heat_flux: inputs.get("heat_flux")?,
        h_fg: inputs.get("h_fg")?,
        cp_liquid: inputs.get("cp_liquid")?,
        mu_liquid: inputs.get("mu_liquid")?,
        surface_tension: inputs.get("surface_tension")?,
        rho_liquid: inputs.get("rho_liquid")?,
        rho_vapor: inputs.get("rho_vapor")?,
        c_sf: inputs.get("c_sf")?,
        exponent: inputs.get("exponent")?,
    }
    .evaluate()
}

const LUMPED_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("mass", "kg", 1e-4, 1e4, 0.5),
    ParamSpec::new("cp", "J/(kg*K)", 100.0, 2e4, 3700.0),
    ParamSpec::new("h", "W/(m2*K)", 0.1, 1e5, 100.0),
    ParamSpec::new("area", "m2", 1e-5, 100.0, 0.03),
    ParamSpec::new("t_initial", "C", -100.0, 1000.0, 25.0),
    ParamSpec::new("t_env", "C", -100.0, 1000.0, 100.0),
    ParamSpec::new("t_target", "C", -100.0, 1000.0, 70.0),
];

fn eval_lumped(inputs: &Inputs) -> EvalResult<FormulaResult> {
    LumpedHeating {
        mass: inputs.get("mass")?,
        cp: inputs.get("cp")?,
        h: inputs.get("h")?,
        area: inputs.get("area")?,
        t_initial: inputs.get("t_initial")?,
        t_env: inputs.get("t_env")?,
        t_target: inputs.get("t_target")?,
    }
    .evaluate()
}

const TRANSIENT_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("length", "m", 1e-3, 10.0, 0.1),
    ParamSpec::new("dx", "m", 1e-4, 1.0, 0.01),
    ParamSpec::new("dt", "s", 1e-4, 3600.0, 0.05),
    ParamSpec::new("total_time", "s", 1e-2, 1e6, 200.0),
    ParamSpec::new("alpha", "m2/s", 1e-9, 1e-3, 1.1e-5),
    ParamSpec::new("t_initial", "C", -100.0, 2000.0, 25.0),
    ParamSpec::new("t_left", "C", -100.0, 2000.0, 100.0),
    ParamSpec::new("t_right", "C", -100.0, 2000.0, 0.0),
];

fn eval_transient(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let slab = TransientSlab {
        length: inputs.get("length")?,
        dx: inputs.get("dx")?,
        dt: inputs.get("dt")?,
        total_time: inputs.get("total_time")?,
        alpha: inputs.get("alpha")?,
        t_initial: inputs.get("t_initial")?,
        t_left: inputs.get("t_left")?,
        t_right: inputs.get("t_right")?,
    };
    let history = slab.simulate()?;
    let last = history
        .profiles
        .last()
        .ok_or_else(|| uo_core::EvalError::numerical("slab history is empty"))?;
    let center = last[last.len() / 2];
    Ok(FormulaResult::new()
        .with("Fourier Number", history.fourier_number, "-")
        .with("Final Center Temperature", center, "C")
        .with("Simulated Time", *history.t.last().unwrap_or(&0.0), "s"))
}

const FICKS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("diffusivity", "m2/s", 1e-15, 1e-3, 1e-9),
    ParamSpec::new("c1", "mol/m3", 0.0, 1e6, 5.0),
    ParamSpec::new("c2", "mol/m3", 0.0, 1e6, 0.0),
    ParamSpec::new("length", "m", 1e-6, 10.0, 0.1),
    ParamSpec::new("area", "m2", 1e-6, 1e4, 1.0),
];

fn eval_ficks(inputs: &Inputs) -> EvalResult<FormulaResult> {
    FicksFlux {
        diffusivity: inputs.get("diffusivity")?,
        c1: inputs.get("c1")?,
        c2: inputs.get("c2")?,
        length: inputs.get("length")?,
        area: inputs.get("area")?,
    }
    .evaluate()
}

const GAS_LOSS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("diffusivity", "m2/s", 1e-15, 1e-3, 1e-9),
    ParamSpec::new("concentration", "mol/m3", 1e-6, 1e6, 40.0),
    ParamSpec::new("path_length", "m", 1e-6, 10.0, 0.001),
    ParamSpec::new("area", "m2", 1e-9, 10.0, 1e-6),
    ParamSpec::new("duration", "s", 1.0, 1e9, 86400.0),
    ParamSpec::new("molar_mass", "g/mol", 1.0, 500.0, 2.0),
];

fn eval_gas_loss(inputs: &Inputs) -> EvalResult<FormulaResult> {
    GasDiffusionLoss {
        diffusivity: inputs.get("diffusivity")?,
        concentration: inputs.get("concentration")?,
        path_length: inputs.get("path_length")?,
        area: inputs.get("area")?,
        duration: inputs.get("duration")?,
        molar_mass: inputs.get("molar_mass")?,
    }
    .evaluate()
}

const WILKE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("association_factor", "-", 1.0, 3.0, 2.6),
    ParamSpec::new("solvent_molar_mass", "g/mol", 1.0, 500.0, 18.0),
    ParamSpec::new("temperature", "K", 200.0, 600.0, 298.0),
    ParamSpec::new("viscosity", "cP", 0.01, 100.0, 0.89),
    ParamSpec::new("solute_molar_volume", "cm3/mol", 1.0, 1000.0, 96.0),
];

fn eval_wilke(inputs: &Inputs) -> EvalResult<FormulaResult> {
    wilke_chang_result(
        inputs.get("association_factor")?,
        inputs.get("solvent_molar_mass")?,
        inputs.get("temperature")?,
        inputs.get("viscosity")?,
        inputs.get("solute_molar_volume")?,
    )
}

const FULLER_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("molar_mass_a", "g/mol", 1.0, 500.0, 28.0),
    ParamSpec::new("molar_mass_b", "g/mol", 1.0, 500.0, 32.0),
    ParamSpec::new("temperature", "K", 200.0, 1500.0, 298.0),
    ParamSpec::new("pressure", "atm", 0.01, 100.0, 1.0),
    ParamSpec::new("diffusion_volume_a", "cm3/mol", 1.0, 500.0, 17.9),
    ParamSpec::new("diffusion_volume_b", "cm3/mol", 1.0, 500.0, 16.6),
];

fn eval_fuller(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let d = fuller_gas_diffusivity(
        inputs.get("molar_mass_a")?,
        inputs.get("molar_mass_b")?,
        inputs.get("temperature")?,
        inputs.get("pressure")?,
        inputs.get("diffusion_volume_a")?,
        inputs.get("diffusion_volume_b")?,
    )?;
    Ok(FormulaResult::new()
        .with("Diffusivity", d, "m2/s")
        .with("Diffusivity (CGS)", d * 1e4, "cm2/s"))
}

const KC_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("diffusivity", "m2/s", 1e-15, 1e-3, 1e-9),
    ParamSpec::new("length", "m", 1e-4, 10.0, 0.01),
    ParamSpec::new("velocity", "m/s", 1e-4, 100.0, 0.2),
    ParamSpec::new("density", "kg/m3", 0.01, 5000.0, 1000.0),
    ParamSpec::new("viscosity", "Pa*s", 1e-6, 10.0, 0.001),
];

fn eval_kc(inputs: &Inputs, correlation: SherwoodCorrelation) -> EvalResult<FormulaResult> {
    MassTransferCoefficient {
        correlation,
        diffusivity: inputs.get("diffusivity")?,
        length: inputs.get("length")?,
        velocity: inputs.get("velocity")?,
        density: inputs.get("density")?,
        viscosity: inputs.get("viscosity")?,
    }
    .evaluate()
}

fn eval_kc_dittus(inputs: &Inputs) -> EvalResult<FormulaResult> {
    eval_kc(inputs, SherwoodCorrelation::DittusBoelter)
}

fn eval_kc_sieder(inputs: &Inputs) -> EvalResult<FormulaResult> {
    eval_kc(inputs, SherwoodCorrelation::SiederTate)
}

const ABSORBER_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("liquid_flow", "mol/s", 1e-3, 1e6, 250.0),
    ParamSpec::new("gas_flow", "mol/s", 1e-3, 1e6, 100.0),
    ParamSpec::new("y_in", "-", 1e-6, 0.999, 0.2),
    ParamSpec::new("y_out", "-", 1e-6, 0.999, 0.05),
    ParamSpec::new("slope", "-", 1e-3, 100.0, 1.2),
    ParamSpec::new("htu", "m", 1e-3, 100.0, 0.5),
];

fn eval_absorber(inputs: &Inputs) -> EvalResult<FormulaResult> {
    PackedAbsorber {
        liquid_flow: inputs.get("liquid_flow")?,
        gas_flow: inputs.get("gas_flow")?,
        y_in: inputs.get("y_in")?,
        y_out: inputs.get("y_out")?,
        slope: inputs.get("slope")?,
        htu: inputs.get("htu")?,
    }
    .evaluate()
}

const DRYING_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("initial_moisture", "-", 1e-3, 5.0, 0.6),
    ParamSpec::new("critical_moisture", "-", 0.0, 5.0, 0.3),
    ParamSpec::new("final_moisture", "-", 0.0, 5.0, 0.1),
    ParamSpec::new("constant_rate", "1/h", 1e-4, 10.0, 0.2),
];

fn eval_drying(inputs: &Inputs) -> EvalResult<FormulaResult> {
    DryingTime {
        initial_moisture: inputs.get("initial_moisture")?,
        critical_moisture: inputs.get("critical_moisture")?,
        final_moisture: inputs.get("final_moisture")?,
        constant_rate: inputs.get("constant_rate")?,
    }
    .evaluate()
}

const EFFICIENCY_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("input_energy", "MJ", 1e-3, 1e9, 500.0),
    ParamSpec::new("output_energy", "MJ", 0.0, 1e9, 420.0),
];

fn eval_efficiency(inputs: &Inputs) -> EvalResult<FormulaResult> {
    EnergyEfficiency {
        input_energy: inputs.get("input_energy")?,
        output_energy: inputs.get("output_energy")?,
    }
    .evaluate()
}

// fuel selects from Fuel::ALL: 0 methane, 1 propane, 2 octane,
// 3 hydrogen, 4 carbon monoxide.
const COMBUSTION_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("fuel", "-", 0.0, 4.0, 0.0),
    ParamSpec::new("afr", "-", 0.5, 100.0, 17.2),
];

fn eval_combustion(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let index = inputs.get("fuel")?.round() as usize;
    let fuel = Fuel::from_index(index)
        .ok_or_else(|| EvalError::domain(format!("unknown fuel index {index}")))?;
    CombustionEfficiency::for_fuel(fuel, inputs.get("afr")?).evaluate()
}

const EMISSIONS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("fuel_flow", "kg/h", 1e-3, 1e6, 200.0),
    ParamSpec::new("excess_air", "%", 0.0, 500.0, 15.0),
];

fn eval_emissions(inputs: &Inputs) -> EvalResult<FormulaResult> {
    FuelEmissions {
        fuel_flow: inputs.get("fuel_flow")?,
        excess_air: inputs.get("excess_air")?,
    }
    .evaluate()
}

const SEIR_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("population", "people", 10.0, 1e10, 10000.0),
    ParamSpec::new("beta", "1/day", 1e-3, 5.0, 0.3),
    ParamSpec::new("sigma", "1/day", 1e-3, 5.0, 0.2),
    ParamSpec::new("gamma", "1/day", 1e-3, 5.0, 0.1),
    ParamSpec::new("initial_infected", "people", 1.0, 1e9, 10.0),
    ParamSpec::new("days", "day", 1.0, 3650.0, 160.0),
];

fn eval_seir(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let beta = inputs.get("beta")?;
    let gamma = inputs.get("gamma")?;
    let params = SeirParams {
        population: inputs.get("population")?,
        beta: BetaSchedule::Constant(beta),
        sigma: inputs.get("sigma")?,
        gamma,
    };
    let spec = SimSpec {
        initial_exposed: 0.0,
        initial_infected: inputs.get("initial_infected")?,
        initial_recovered: 0.0,
        days: inputs.get("days")? as usize,
    };
    let series = simulate(&params, &spec)?;
    let (peak, peak_day) = series.peak_infected();
    let final_state = series
        .final_state()
        .ok_or_else(|| EvalError::numerical("simulation produced no samples"))?;
    Ok(FormulaResult::new()
        .with("R0", basic_r0(beta, gamma)?, "-")
        .with("Peak Infected", peak, "people")
        .with("Peak Day", peak_day, "day")
        .with("Final Recovered", final_state[3], "people")
        .with("Final Susceptible", final_state[0], "people"))
}

const R0_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("beta", "1/day", 1e-3, 5.0, 0.3),
    ParamSpec::new("gamma", "1/day", 1e-3, 5.0, 0.1),
];

fn eval_r0(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let r0 = basic_r0(inputs.get("beta")?, inputs.get("gamma")?)?;
    Ok(FormulaResult::new().with("R0", r0, "-"))
}

const CATALYST_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("initial_activity", "-", 1e-3, 10.0, 1.0),
    ParamSpec::new("decay_constant", "1/day", 1e-6, 10.0, 0.01),
    ParamSpec::new("threshold", "-", 1e-4, 10.0, 0.5),
];

fn eval_catalyst(inputs: &Inputs) -> EvalResult<FormulaResult> {
    let fit = CatalystDecayFit {
        a0: inputs.get("initial_activity")?,
        k: inputs.get("decay_constant")?,
        r_squared: 1.0,
    };
    let t = fit.replacement_time(inputs.get("threshold")?)?;
    Ok(FormulaResult::new()
        .with("Replacement Time", t, "day")
        .with("Activity at Replacement", fit.activity_at(t), "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_resolvable() {
        let mut names: Vec<&str> = ALL_TOOLS
            .iter()
            .map(|id| id.descriptor().name)
            .collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);

        for id in ALL_TOOLS {
            let name = id.descriptor().name;
            assert_eq!(ToolId::from_name(name), Some(*id));
        }
        assert_eq!(ToolId::from_name("nope"), None);
    }

    #[test]
    fn defaults_lie_inside_declared_ranges() {
        for id in ALL_TOOLS {
            let descriptor = id.descriptor();
            for param in descriptor.params {
                assert!(
                    param.check(param.default).is_ok(),
                    "{}/{} default out of range",
                    descriptor.name,
                    param.name
                );
            }
        }
    }

    #[test]
    fn wall_tool_matches_hand_value() {
        let inputs = Inputs::new()
            .with("layer1_thickness", 0.1)
            .with("layer1_conductivity", 1.0)
            .with("layer2_thickness", 0.2)
            .with("layer2_conductivity", 1.0)
            .with("delta_t", 70.0)
            .with("area", 1.0);
        let result = eval_wall(&inputs).unwrap();
        let q = result.get("Heat Loss per Area").unwrap();
        assert!((q - 70.0 / 0.3).abs() < 1e-9);
    }

    #[test]
    fn absorber_tool_sizes_default_column() {
        let inputs = Inputs::new()
            .with("liquid_flow", 250.0)
            .with("gas_flow", 100.0)
            .with("y_in", 0.2)
            .with("y_out", 0.05)
            .with("slope", 1.2)
            .with("htu", 0.5);
        let result = eval_absorber(&inputs).unwrap();
        assert!(result.get("NTU").unwrap() > 0.0);
        assert!(result.get("Packed Height").unwrap() > 0.0);
        assert!((result.get("Absorption Factor").unwrap() - 250.0 / 120.0).abs() < 1e-12);
    }

    #[test]
    fn combustion_tool_selects_fuel_by_index() {
        // index 3 is hydrogen (AFR_st 34.3); running at stoichiometric
        // must give the peak efficiency.
        let inputs = Inputs::new().with("fuel", 3.0).with("afr", 34.3);
        let result = eval_combustion(&inputs).unwrap();
        assert!((result.get("Combustion Efficiency").unwrap() - 100.0).abs() < 1e-9);
        assert!(result.get("AFR Deviation").unwrap().abs() < 1e-9);

        let bad = Inputs::new().with("fuel", 9.0).with("afr", 17.2);
        assert!(eval_combustion(&bad).is_err());
    }

    #[test]
    fn seir_tool_reports_epidemic_shape() {
        let inputs = Inputs::new()
            .with("population", 10000.0)
            .with("beta", 0.3)
            .with("sigma", 0.2)
            .with("gamma", 0.1)
            .with("initial_infected", 10.0)
            .with("days", 160.0);
        let result = eval_seir(&inputs).unwrap();
        assert!((result.get("R0").unwrap() - 3.0).abs() < 1e-12);
        assert!(result.get("Peak Infected").unwrap() > 10.0);
        assert!(result.get("Final Recovered").unwrap() > 0.0);
    }
}
