//! Evaluation service.
//!
//! Resolves a tool by name, merges user inputs with declared defaults,
//! validates every parameter against its range, and evaluates. Logging to
//! the result store and webhook notification are optional side channels
//! that never affect the evaluation outcome.

use tracing::{info, warn};
use uo_core::{FormulaResult, Inputs, ResponseCurve, SweepSpec, sweep_curve};
use uo_store::ResultLog;

use crate::error::{AppError, AppResult};
use crate::notify::{ResultNotification, WebhookNotifier};
use crate::registry::{ToolDescriptor, ToolId};

/// Optional side channels for one evaluation.
#[derive(Default)]
pub struct EvalSinks<'a> {
    pub log: Option<&'a ResultLog>,
    pub notifier: Option<&'a WebhookNotifier>,
}

/// Resolve a tool name or report `UnknownTool`.
pub fn resolve_tool(name: &str) -> AppResult<ToolDescriptor> {
    ToolId::from_name(name)
        .map(|id| id.descriptor())
        .ok_or_else(|| AppError::UnknownTool {
            name: name.to_string(),
        })
}

/// User inputs merged over the tool's declared defaults, range-checked.
pub fn prepare_inputs(descriptor: &ToolDescriptor, user: &Inputs) -> AppResult<Inputs> {
    let mut merged = Inputs::new();
    for param in descriptor.params {
        let value = user.get_or(param.name, param.default);
        merged.insert(param.name, param.check(value)?);
    }
    Ok(merged)
}

/// Evaluate one tool and fan the results out to the configured sinks.
pub fn evaluate(name: &str, user: &Inputs, sinks: &EvalSinks<'_>) -> AppResult<FormulaResult> {
    let descriptor = resolve_tool(name)?;
    let inputs = prepare_inputs(&descriptor, user)?;
    let result = (descriptor.eval)(&inputs)?;
    info!(tool = descriptor.name, outputs = result.len(), "evaluated");

    for value in result.values() {
        if let Some(log) = sinks.log {
            if let Err(e) = log.append_result(descriptor.name, &value.name, value.value) {
                warn!(tool = descriptor.name, error = %e, "result log append failed");
            }
        }
        if let Some(notifier) = sinks.notifier {
            let payload = ResultNotification {
                tool: descriptor.name,
                parameter: &value.name,
                value: value.value,
                unit: &value.unit,
            };
            if let Err(e) = notifier.notify(&payload) {
                warn!(tool = descriptor.name, error = %e, "webhook notification failed");
            }
        }
    }
    Ok(result)
}

/// Sweep one input parameter of a tool and collect a response curve for
/// one named output. Evaluations that fail inside the range become gaps.
pub fn sweep(
    name: &str,
    user: &Inputs,
    param: &str,
    output: &str,
    spec: &SweepSpec,
) -> AppResult<ResponseCurve> {
    let descriptor = resolve_tool(name)?;
    if !descriptor.params.iter().any(|p| p.name == param) {
        return Err(AppError::Eval(uo_core::EvalError::MissingParam {
            name: param.to_string(),
        }));
    }
    let base = prepare_inputs(&descriptor, user)?;

    let curve = sweep_curve(param, output, spec, |x| {
        let mut point_inputs = base.clone();
        point_inputs.insert(param, x);
        let result = (descriptor.eval)(&point_inputs)?;
        result
            .get(output)
            .ok_or_else(|| uo_core::EvalError::MissingParam {
                name: output.to_string(),
            })
    });
    info!(
        tool = descriptor.name,
        param,
        output,
        points = curve.points.len(),
        gaps = curve.num_gaps(),
        "sweep complete"
    );
    Ok(curve)
}

/// Run the full anomaly-detection pipeline on a feature matrix:
/// z-score scaling, Isolation Forest, alert classification.
pub fn detect_anomalies(
    rows: &[Vec<f64>],
    config: &uo_analytics::ForestConfig,
    seed: u64,
) -> AppResult<uo_analytics::AlertSummary> {
    let scaler = uo_analytics::StandardScaler::fit(rows)?;
    let scaled = scaler.transform(rows)?;
    let forest = uo_analytics::IsolationForest::fit(&scaled, config, seed)?;

    let mut scores = Vec::with_capacity(scaled.len());
    let mut flags = Vec::with_capacity(scaled.len());
    for row in &scaled {
        scores.push(forest.score(row)?);
        flags.push(forest.predict(row)?);
    }
    let summary = uo_analytics::classify_batch(&scores, &flags)?;
    info!(
        rows = summary.total_rows,
        faults = summary.fault_count,
        level = ?summary.level,
        "detection complete"
    );
    Ok(summary)
}
