use cubic_eos::cubic::Cubic;
use cubic_eos::CriticalRecord;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::sync::Arc;

mod derivatives;
mod phase;
mod roots;

pub fn record(name: &str) -> Result<CriticalRecord, Box<dyn Error>> {
    let file = fs::read_to_string("tests/peng_robinson/test_parameters.json")?;
    let records: HashMap<String, CriticalRecord> = serde_json::from_str(&file)?;
    records
        .get(name)
        .copied()
        .ok_or_else(|| format!("no parameters for {name}").into())
}

pub fn hexane() -> Result<Arc<Cubic>, Box<dyn Error>> {
    Ok(Arc::new(Cubic::peng_robinson(record("hexane")?)?))
}
