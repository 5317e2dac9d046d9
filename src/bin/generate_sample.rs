use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    ArrayRef, BooleanArray, DurationSecondArray, Float64Array, Int64Array, StringArray,
    TimestampMillisecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo) as u64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (agency, region, department, country)
const AGENCIES: [(&str, &str, &str, &str); 6] = [
    ("LYON", "ARA", "69", "FR"),
    ("PARIS", "IDF", "75", "FR"),
    ("MARSEILLE", "PACA", "13", "FR"),
    ("LILLE", "HDF", "59", "FR"),
    ("NANTES", "PDL", "44", "FR"),
    ("BRUXELLES", "BRU", "1000", "BE"),
];

/// (product, promised transit time in hours)
const PRODUCTS: [(&str, i64); 3] = [("EXPRESS", 24), ("STANDARD", 48), ("ECO", 96)];

const PRIORITIES: [&str; 3] = ["URGENT", "NORMAL", "BASSE"];

/// 2024-01-01 00:00:00 UTC
const BASE_EPOCH_S: i64 = 1_704_067_200;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    const N: usize = 600;

    let mut ot: Vec<String> = Vec::with_capacity(N);
    let mut date_ot: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut date_depart: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut date_arrivee: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut date_prevue: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut date_evnt: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut agence_enl: Vec<String> = Vec::with_capacity(N);
    let mut agence_liv: Vec<String> = Vec::with_capacity(N);
    let mut produit: Vec<String> = Vec::with_capacity(N);
    let mut priorite: Vec<String> = Vec::with_capacity(N);
    let mut pays_enl: Vec<String> = Vec::with_capacity(N);
    let mut pays_liv: Vec<String> = Vec::with_capacity(N);
    let mut region_enl: Vec<String> = Vec::with_capacity(N);
    let mut region_liv: Vec<String> = Vec::with_capacity(N);
    let mut dept_enl: Vec<String> = Vec::with_capacity(N);
    let mut dept_liv: Vec<String> = Vec::with_capacity(N);
    let mut nb_colis: Vec<i64> = Vec::with_capacity(N);
    let mut poids: Vec<f64> = Vec::with_capacity(N);
    let mut dl_h: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut dt_h: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut ddk_h: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut delais: Vec<Option<i64>> = Vec::with_capacity(N);
    let mut retard: Vec<Option<bool>> = Vec::with_capacity(N);
    let mut avant_13h: Vec<Option<bool>> = Vec::with_capacity(N);

    for i in 0..N {
        let pickup = rng.pick(&AGENCIES);
        let delivery = rng.pick(&AGENCIES);
        let (product, promised_hours) = *rng.pick(&PRODUCTS);

        let day = rng.range(0, 90);
        let departure_s =
            BASE_EPOCH_S + day * 86_400 + rng.range(6, 12) * 3_600 + rng.range(0, 3_600);
        let ordered_s = departure_s - rng.range(2, 24) * 3_600;

        let processing_s = rng.range(1_800, 14_400);
        let transit_s = promised_hours * 3_600 / 2 + rng.range(0, promised_hours * 3_600);
        let arrival_s = departure_s + processing_s + transit_s;
        let promised_s = departure_s + promised_hours * 3_600;
        let last_mile_s = rng.range(1_800, 10_800);

        // A few orders are still on the road: no arrival, no durations yet.
        let in_transit = rng.next_f64() < 0.05;

        ot.push(format!("OT-{:06}", i + 1));
        date_ot.push(Some(ordered_s * 1_000));
        date_depart.push(Some(departure_s * 1_000));
        date_prevue.push(Some(promised_s * 1_000));
        agence_enl.push(pickup.0.to_string());
        agence_liv.push(delivery.0.to_string());
        produit.push(product.to_string());
        priorite.push((*rng.pick(&PRIORITIES)).to_string());
        pays_enl.push(pickup.3.to_string());
        pays_liv.push(delivery.3.to_string());
        region_enl.push(pickup.1.to_string());
        region_liv.push(delivery.1.to_string());
        dept_enl.push(pickup.2.to_string());
        dept_liv.push(delivery.2.to_string());
        nb_colis.push(rng.range(1, 9));
        poids.push(rng.gauss(80.0, 25.0).clamp(1.0, 500.0));

        if in_transit {
            date_arrivee.push(None);
            date_evnt.push(Some(departure_s * 1_000));
            dl_h.push(None);
            dt_h.push(Some(processing_s));
            ddk_h.push(None);
            delais.push(None);
            retard.push(None);
            avant_13h.push(None);
        } else {
            let delay_s = arrival_s - promised_s;
            date_arrivee.push(Some(arrival_s * 1_000));
            date_evnt.push(Some((arrival_s + rng.range(0, 1_800)) * 1_000));
            dl_h.push(Some(arrival_s - departure_s));
            dt_h.push(Some(processing_s));
            ddk_h.push(Some(last_mile_s));
            delais.push(Some(delay_s));
            retard.push(Some(delay_s > 0));
            avant_13h.push(Some((arrival_s.rem_euclid(86_400)) / 3_600 < 13));
        }
    }

    let utf8 = |name: &str, values: &[String]| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Utf8, false),
            Arc::new(StringArray::from_iter_values(values.iter())) as ArrayRef,
        )
    };
    let ts = |name: &str, values: Vec<Option<i64>>| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Timestamp(TimeUnit::Millisecond, None), true),
            Arc::new(TimestampMillisecondArray::from(values)) as ArrayRef,
        )
    };
    let dur = |name: &str, values: Vec<Option<i64>>| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Duration(TimeUnit::Second), true),
            Arc::new(DurationSecondArray::from(values)) as ArrayRef,
        )
    };
    let flag = |name: &str, values: Vec<Option<bool>>| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Boolean, true),
            Arc::new(BooleanArray::from(values)) as ArrayRef,
        )
    };

    let columns: Vec<(Field, ArrayRef)> = vec![
        utf8("OT", &ot),
        ts("DATE_OT", date_ot),
        ts("DATE_DEPART", date_depart),
        ts("DATE_ARRIVEE", date_arrivee),
        ts("DATE_LIVRAISON_PREVUE", date_prevue),
        ts("DATE_DERNIER_EVNT", date_evnt),
        utf8("AGENCE_ENL", &agence_enl),
        utf8("AGENCE_LIV", &agence_liv),
        utf8("PRODUIT", &produit),
        utf8("PRIORITE", &priorite),
        utf8("PAYS_ENL", &pays_enl),
        utf8("PAYS_LIV", &pays_liv),
        utf8("REGION_ENL", &region_enl),
        utf8("REGION_LIV", &region_liv),
        utf8("DEPT_ENL", &dept_enl),
        utf8("DEPT_LIV", &dept_liv),
        (
            Field::new("NB_COLIS", DataType::Int64, false),
            Arc::new(Int64Array::from(nb_colis)) as ArrayRef,
        ),
        (
            Field::new("POIDS_DECLARE", DataType::Float64, false),
            Arc::new(Float64Array::from(poids)) as ArrayRef,
        ),
        dur("DL_H", dl_h),
        dur("DT_H", dt_h),
        dur("DDK_H", ddk_h),
        dur("DELAIS_RETARD", delais),
        flag("RETARD", retard),
        flag("LIVRE_AVANT_13H", avant_13h),
    ];

    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    // The dashboard's default extract path.
    let output_path = "df_geo_v2.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("Wrote {N} orders to {output_path}");
    Ok(())
}
