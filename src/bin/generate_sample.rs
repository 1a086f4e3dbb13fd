use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const YEARS: std::ops::RangeInclusive<i32> = 2015..=2024;

/// Small deterministic LCG, enough for plausible-looking noise.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

enum Shape {
    /// Grows from `base` by roughly `growth` per year.
    Absolute { base: f64, growth: f64 },
    /// Fraction wandering around `center`.
    Ratio { center: f64, spread: f64 },
}

struct Row {
    entity: &'static str,
    variable: &'static str,
    values: Vec<Option<f64>>,
}

fn generate(rng: &mut Lcg) -> Vec<Row> {
    let entities = [
        ("Estado de São Paulo", 1.0),
        ("Estado do Rio de Janeiro", 0.45),
        ("Estado de Minas Gerais", 0.38),
        ("Município de Salvador", 0.04),
    ];
    let variables = [
        (
            "Receita Corrente Líquida (R$ milhões)",
            Shape::Absolute {
                base: 180_000.0,
                growth: 0.06,
            },
        ),
        (
            "Despesa com Pessoal (R$ milhões)",
            Shape::Absolute {
                base: 85_000.0,
                growth: 0.05,
            },
        ),
        (
            "Dívida Consolidada Líquida / RCL",
            Shape::Ratio {
                center: 0.7,
                spread: 0.15,
            },
        ),
        (
            "Crescimento real do PIB",
            Shape::Ratio {
                center: 0.015,
                spread: 0.04,
            },
        ),
    ];

    let mut rows = Vec::new();
    for (e_idx, &(entity, size)) in entities.iter().enumerate() {
        for (v_idx, (variable, shape)) in variables.iter().enumerate() {
            let values = YEARS
                .enumerate()
                .map(|(y_idx, _)| {
                    // A few holes so the viewer shows gaps.
                    if (e_idx + v_idx + y_idx) % 11 == 10 {
                        return None;
                    }
                    let v = match shape {
                        Shape::Absolute { base, growth } => {
                            base * size * (1.0 + growth).powi(y_idx as i32) * (1.0 + 0.02 * rng.jitter())
                        }
                        Shape::Ratio { center, spread } => center + spread * rng.jitter(),
                    };
                    Some((v * 10_000.0).round() / 10_000.0)
                })
                .collect();
            rows.push(Row {
                entity,
                variable: *variable,
                values,
            });
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;

    let mut header = vec!["ente".to_string(), "variavel".to_string()];
    header.extend(YEARS.map(|y| y.to_string()));
    writer.write_record(&header)?;

    for (i, row) in rows.iter().enumerate() {
        let mut record = vec![row.entity.to_string(), row.variable.to_string()];
        record.extend(row.values.iter().enumerate().map(|(j, v)| match v {
            Some(v) => v.to_string(),
            // Some holes are written as text to exercise the non-numeric path.
            None if (i + j) % 2 == 0 => "n/d".to_string(),
            None => String::new(),
        }));
        writer.write_record(&record)?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let mut fields = vec![
        Field::new("ente", DataType::Utf8, false),
        Field::new("variavel", DataType::Utf8, false),
    ];
    fields.extend(YEARS.map(|y| Field::new(y.to_string(), DataType::Float64, true)));
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.entity))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.variable))),
    ];
    for (y_idx, _) in YEARS.enumerate() {
        let values: Float64Array = rows.iter().map(|r| r.values[y_idx]).collect();
        columns.push(Arc::new(values));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = Lcg(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_entes.csv")?;
    write_parquet(&rows, "sample_entes.parquet")?;

    println!(
        "Wrote {} rows ({} years each) to sample_entes.csv and sample_entes.parquet",
        rows.len(),
        YEARS.count()
    );
    Ok(())
}
