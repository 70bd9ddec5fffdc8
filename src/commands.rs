//! Command execution — parsed CLI → rendered output.

use anyhow::{bail, Context as _};
use serde::Serialize;

use crate::cli::{Command, OutputFormat};
use crate::config::Config;
use crate::field::{
    cardinality_of, is_exported, is_presence_flag, is_text_decodable, is_zero, plan_fields,
    Cardinality,
};
use crate::scalar::StdScalars;
use crate::types::{TypeDescriptor, TypeRegistry, Value};

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub registry: TypeRegistry,
    pub scalars: StdScalars,
    pub format: OutputFormat,
}

impl Context {
    pub fn from_config(config: &Config, format: OutputFormat) -> anyhow::Result<Self> {
        Ok(Self {
            registry: config.registry()?,
            scalars: config.scalars(),
            format,
        })
    }
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    /// False when a classification or plan failed.
    pub success: bool,
}

/// Classification of one type expression.
#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    #[serde(rename = "type")]
    pub ty: String,
    pub cardinality: Cardinality,
    pub presence_flag: bool,
    pub text_decodable: bool,
    pub error: Option<String>,
}

impl TypeReport {
    pub fn new(ty: &TypeDescriptor, scalars: &StdScalars) -> Self {
        let result = cardinality_of(ty, scalars);
        Self {
            ty: ty.to_string(),
            cardinality: Cardinality::from_result(&result),
            presence_flag: is_presence_flag(ty),
            text_decodable: is_text_decodable(ty),
            error: result.err().map(|e| e.to_string()),
        }
    }

    fn render(&self) -> String {
        let mut line = format!("{}: {}", self.ty, self.cardinality);
        if let Some(error) = &self.error {
            line.push_str(&format!(" ({})", error));
        } else if self.text_decodable {
            line.push_str(" (text decoder)");
        } else if self.presence_flag {
            line.push_str(" (presence flag)");
        }
        line
    }
}

#[derive(Debug, Serialize)]
struct ZeroReport {
    #[serde(rename = "type")]
    ty: String,
    zero: bool,
}

#[derive(Debug, Serialize)]
struct ExportedReport<'a> {
    name: &'a str,
    exported: bool,
}

#[derive(Debug, Serialize)]
struct PlanFailure {
    error: String,
}

pub fn run(command: &Command, ctx: &Context) -> anyhow::Result<Outcome> {
    match command {
        Command::Classify { types } => classify(types, ctx),
        Command::Fields { name } => fields(name, ctx),
        Command::Zero { ty, json } => zero(ty, json, ctx),
        Command::Exported { names } => exported(names, ctx),
    }
}

fn parse_type(ctx: &Context, expr: &str) -> anyhow::Result<TypeDescriptor> {
    ctx.registry
        .parse(expr)
        .with_context(|| format!("Invalid type expression '{}'", expr))
}

fn classify(types: &[String], ctx: &Context) -> anyhow::Result<Outcome> {
    let reports = types
        .iter()
        .map(|expr| parse_type(ctx, expr).map(|ty| TypeReport::new(&ty, &ctx.scalars)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let success = reports.iter().all(|r| r.error.is_none());
    let output = match ctx.format {
        OutputFormat::Text => reports
            .iter()
            .map(TypeReport::render)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
    };

    Ok(Outcome { output, success })
}

fn fields(name: &str, ctx: &Context) -> anyhow::Result<Outcome> {
    let Some(ty) = ctx.registry.get(name) else {
        bail!("Type '{}' is not declared", name);
    };

    let plans = match plan_fields(ty, &ctx.scalars) {
        Ok(plans) => plans,
        Err(err) => {
            let output = match ctx.format {
                OutputFormat::Text => err.to_string(),
                OutputFormat::Json => serde_json::to_string_pretty(&PlanFailure {
                    error: err.to_string(),
                })?,
            };
            return Ok(Outcome {
                output,
                success: false,
            });
        }
    };

    let output = match ctx.format {
        OutputFormat::Text => plans
            .iter()
            .map(|p| format!("{}: {} ({})", p.name, p.cardinality, p.ty))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&plans)?,
    };

    Ok(Outcome {
        output,
        success: true,
    })
}

fn zero(expr: &str, json: &str, ctx: &Context) -> anyhow::Result<Outcome> {
    let ty = parse_type(ctx, expr)?;
    let json: serde_json::Value =
        serde_json::from_str(json).with_context(|| format!("Invalid JSON '{}'", json))?;
    let value = Value::from_json(&ty, &json)
        .with_context(|| format!("Cannot decode JSON as {}", ty))?;

    let zero = is_zero(&value);
    let output = match ctx.format {
        OutputFormat::Text => zero.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&ZeroReport {
            ty: ty.to_string(),
            zero,
        })?,
    };

    Ok(Outcome {
        output,
        success: true,
    })
}

fn exported(names: &[String], ctx: &Context) -> anyhow::Result<Outcome> {
    let reports: Vec<_> = names
        .iter()
        .map(|name| ExportedReport {
            name,
            exported: is_exported(name),
        })
        .collect();

    let output = match ctx.format {
        OutputFormat::Text => reports
            .iter()
            .map(|r| {
                let state = if r.exported { "exported" } else { "unexported" };
                format!("{}: {}", r.name, state)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
    };

    Ok(Outcome {
        output,
        success: true,
    })
}
