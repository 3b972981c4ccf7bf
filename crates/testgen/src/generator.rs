use chrono::{DateTime, Duration, Local};
use rand::distr::{Distribution, Uniform};
use rand::RngExt;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use sercheck_core::schedule::types::{Access, Operation, Schedule, Step};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct ScheduleParams {
    pub id: u64,
    pub n_transaction: u64,
    pub n_item: u64,
    pub n_step: u64,
}

/// A generated schedule together with the parameters and timing of its
/// generation. This is the JSON document the CLI reads and writes.
#[derive(Deserialize, Serialize, Debug)]
pub struct GeneratedSchedule {
    params: ScheduleParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    data: Schedule<String, String>,
}

impl GeneratedSchedule {
    #[must_use]
    pub const fn new(
        params: ScheduleParams,
        info: String,
        start: DateTime<Local>,
        end: DateTime<Local>,
        data: Schedule<String, String>,
    ) -> Self {
        Self {
            params,
            info,
            start,
            end,
            data,
        }
    }

    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_data(&self) -> &Schedule<String, String> {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Schedule<String, String> {
        self.data
    }

    #[must_use]
    pub const fn get_params(&self) -> &ScheduleParams {
        &self.params
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Name of the `index`-th (0-based) transaction: `T1`, `T2`, ...
#[must_use]
pub fn transaction_name(index: u64) -> String {
    format!("T{}", index + 1)
}

/// Name of the `index`-th (0-based) item: `A`..`Z`, then `X26`, `X27`, ...
#[must_use]
pub fn item_name(index: u64) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => format!("X{index}"),
    }
}

/// Generate a single schedule of `n_step` steps over `n_transaction`
/// transactions and `n_item` items.
///
/// Every step has one column per transaction: column `j` is either a gap or
/// an operation of transaction `j`, so no step ever holds two operations of
/// the same transaction. Each transaction takes part in a step with
/// probability one half, and each operation is a read or a write with
/// probability one half on a uniformly chosen item.
///
/// # Panics
///
/// Panics if `n_item` is zero and `n_transaction` is not (cannot create a
/// uniform distribution over an empty range).
#[must_use]
pub fn generate_single_schedule(params: &ScheduleParams) -> Schedule<String, String> {
    if params.n_transaction == 0 {
        return (0..params.n_step).map(|_| Step::new()).collect();
    }

    let mut random_generator = rand::rng();
    let item_range = Uniform::new(0, params.n_item).expect("n_item must be positive");

    (0..params.n_step)
        .map(|_| {
            (0..params.n_transaction)
                .map(|txn| {
                    if !random_generator.random::<bool>() {
                        return None;
                    }
                    let item = item_range.sample(&mut random_generator);
                    let access = if random_generator.random::<bool>() {
                        Access::Write
                    } else {
                        Access::Read
                    };
                    Some(Operation::new(
                        transaction_name(txn),
                        access,
                        item_name(item),
                    ))
                })
                .collect()
        })
        .collect()
}

#[must_use]
pub fn generate_mult_schedules(
    n_schedule: u64,
    n_transaction: u64,
    n_item: u64,
    n_step: u64,
) -> Vec<GeneratedSchedule> {
    (0..n_schedule)
        .into_par_iter()
        .map(|id| {
            let params = ScheduleParams::builder()
                .id(id)
                .n_transaction(n_transaction)
                .n_item(n_item)
                .n_step(n_step)
                .build();
            let start = Local::now();
            let data = generate_single_schedule(&params);
            let end = Local::now();
            GeneratedSchedule::new(params, "generated".to_string(), start, end, data)
        })
        .collect()
}
