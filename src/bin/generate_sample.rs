//! Writes a deterministic `gdelt_events.csv` sample with the production
//! column set, for local runs of the explorer without a real export.

use chrono::NaiveDate;

/// Small deterministic LCG so repeated runs produce identical files.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// Uniform float in [lo, hi).
    fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (self.next_u32() as f64 / u32::MAX as f64) * (hi - lo)
    }
}

const CATEGORIES: [(&str, &[&str]); 4] = [
    ("PROTEST", &["Demonstrate or rally", "Hunger strike", "Obstruct passage"]),
    ("APPEAL", &["Appeal for aid", "Appeal for change"]),
    ("FIGHT", &["Use conventional force", "Impose blockade"]),
    ("CONSULT", &["Make a visit", "Host a visit"]),
];

const COUNTRIES: [(&str, f64, f64); 5] = [
    ("Portugal", 38.72, -9.13),
    ("Spain", 40.42, -3.70),
    ("Brazil", -15.79, -47.88),
    ("Angola", -8.84, 13.23),
    ("Cape Verde", 14.93, -23.51),
];

const SOURCES: [&str; 3] = ["publico.pt", "elpais.com", "reuters.com"];

fn main() {
    let output_path = "gdelt_events.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("failed to create output file");
    writer
        .write_record(gdelt_explorer::data::loader::COLUMNS)
        .expect("failed to write header");

    let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
    let mut rng = Lcg(20240501);
    let mut id: i64 = 110_000_000;

    for day_offset in 0..7 {
        let date = start + chrono::Days::new(day_offset);
        for (country, lat, lon) in COUNTRIES {
            for (category, subcategories) in CATEGORIES {
                for subcategory in subcategories {
                    id += 1;
                    let translated = id % 3 == 0;
                    let goldstein = match category {
                        "FIGHT" => rng.range_f64(-10.0, -5.0),
                        "PROTEST" => rng.range_f64(-7.5, 0.0),
                        _ => rng.range_f64(0.0, 7.0),
                    };
                    writer
                        .write_record([
                            id.to_string(),
                            date.format("%Y-%m-%d").to_string(),
                            if translated { "1" } else { "0" }.to_string(),
                            category.to_string(),
                            subcategory.to_string(),
                            "GOVERNMENT".to_string(),
                            String::new(),
                            country.to_string(),
                            format!("{:.4}", lat + rng.range_f64(-1.5, 1.5)),
                            format!("{:.4}", lon + rng.range_f64(-1.5, 1.5)),
                            format!("{:.2}", rng.range_f64(-9.0, 6.0)),
                            (1 + rng.next_u32() % 40).to_string(),
                            format!("{goldstein:.1}"),
                            format!("https://{}/{id}", SOURCES[(id % 3) as usize]),
                            SOURCES[(id % 3) as usize].to_string(),
                        ])
                        .expect("failed to write row");
                }
            }
        }
    }

    writer.flush().expect("failed to flush output");
    println!("Wrote {} events to {output_path}", id - 110_000_000);
}
