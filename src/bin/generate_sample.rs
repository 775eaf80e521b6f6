use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use launch_dashboard::data::model::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_FLIGHT_NUMBER, COL_OUTCOME, COL_PAYLOAD,
    COL_SITE,
};

/// Write a synthetic launch records file in the dashboard's input schema.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Arguments {
    /// Output file; `.parquet` writes Parquet, anything else CSV.
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches to generate.
    #[arg(short, long, default_value_t = 56)]
    count: usize,

    /// PRNG seed.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One generated row.
struct Launch {
    flight: i64,
    site: &'static str,
    outcome: i64,
    payload: f64,
    booster_version: String,
    booster_category: &'static str,
}

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order: (category, version prefix, base success rate).
const BOOSTERS: [(&str, &str, f64); 5] = [
    ("v1.0", "F9 v1.0", 0.2),
    ("v1.1", "F9 v1.1", 0.35),
    ("FT", "F9 FT", 0.7),
    ("B4", "F9 B4", 0.75),
    ("B5", "F9 B5", 0.9),
];

fn generate(count: usize, rng: &mut SimpleRng) -> Vec<Launch> {
    (0..count)
        .map(|i| {
            // Later flights use newer boosters.
            let generation = (i * BOOSTERS.len() / count.max(1)).min(BOOSTERS.len() - 1);
            let (category, prefix, base_rate) = BOOSTERS[generation];

            // Round to 10 kg; some early flights carried no payload mass.
            let payload = if rng.next_f64() < 0.05 {
                0.0
            } else {
                (rng.next_f64() * 9_800.0 / 10.0).round() * 10.0 + 200.0
            };

            // Heavier payloads are a little riskier.
            let success_rate = (base_rate - payload / 40_000.0).clamp(0.05, 0.95);
            let outcome = i64::from(rng.next_f64() < success_rate);

            Launch {
                flight: i as i64 + 1,
                site: *rng.pick(&SITES),
                outcome,
                payload,
                booster_version: format!("{prefix} B{:04}", 1000 + i),
                booster_category: category,
            }
        })
        .collect()
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        COL_FLIGHT_NUMBER,
        COL_SITE,
        COL_OUTCOME,
        COL_PAYLOAD,
        COL_BOOSTER_VERSION,
        COL_BOOSTER_CATEGORY,
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.outcome.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_OUTCOME, DataType::Int64, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.outcome))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    let mut rng = SimpleRng::new(args.seed);
    let launches = generate(args.count, &mut rng);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        write_parquet(&args.output, &launches)?;
    } else {
        write_csv(&args.output, &launches)?;
    }

    let successes = launches.iter().filter(|l| l.outcome == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {}",
        launches.len(),
        args.output.display()
    );
    Ok(())
}
