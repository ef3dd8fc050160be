use bp_centiles::data_types::{ChartSettings, Encounter, Patient, Sex, ViewSettings};
use chrono::{TimeZone, Utc};

fn encounter(year: i32, age: f64, systolic: f64, diastolic: f64) -> Encounter {
    Encounter {
        timestamp: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        age,
        height: 100.0 + age * 6.0,
        systolic,
        diastolic,
        systolic_percentile: 50.0,
        diastolic_percentile: 40.0,
        site: "Right arm".into(),
        position: "Sitting".into(),
        method: "Auscultation".into(),
        date: format!("01/01/{}", year),
        encounter_type: "Office visit".into(),
    }
}

fn patient() -> Patient {
    Patient::new(
        Sex::Female,
        (0..5)
            .map(|i| encounter(2008 + i, 1.0 + i as f64, 100.0 + i as f64, 60.0 + i as f64))
            .collect(),
    )
}

#[test]
fn test_recent_encounters_keeps_chronological_order() {
    let p = patient();
    let recent: Vec<f64> = p.recent_encounters(3).map(|e| e.systolic).collect();
    assert_eq!(recent, vec![102.0, 103.0, 104.0]);
    assert_eq!(p.recent_encounters(10).count(), 5);
    assert_eq!(p.recent_encounters(0).count(), 0);
}

#[test]
fn test_time_range() {
    let p = patient();
    assert_eq!(p.start_time(), Some(Utc.with_ymd_and_hms(2008, 1, 1, 0, 0, 0).unwrap()));
    assert_eq!(p.end_time(), Some(Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap()));

    let empty = Patient::new(Sex::Male, vec![]);
    assert!(empty.is_empty());
    assert_eq!(empty.start_time(), None);
    assert!(empty.latest_reading().is_none());
}

#[test]
fn test_latest_reading() {
    let reading = patient().latest_reading().unwrap();
    assert_eq!(reading.age, 5.0);
    assert_eq!(reading.sex, Sex::Female);
    assert_eq!(reading.systolic, 104.0);
    assert_eq!(reading.diastolic, 64.0);
}

#[test]
fn test_filtered() {
    let p = patient();
    let older = p.filtered(|e| e.age >= 3.0);
    assert_eq!(older.len(), 3);
    assert_eq!(older.sex, Sex::Female);
    assert_eq!(p.len(), 5);
}

#[test]
fn test_patient_from_json() {
    let json = r#"{
        "sex": "male",
        "encounters": [{
            "timestamp": "2010-03-15T00:00:00Z",
            "age": 4.5,
            "height": 104.0,
            "systolic": 98.0,
            "diastolic": 55.0,
            "systolic_percentile": 61.0,
            "diastolic_percentile": 48.0,
            "site": "Left arm",
            "position": "Lying",
            "method": "Oscillometric",
            "date": "03/15/2010",
            "encounter_type": "Clinic"
        }]
    }"#;
    let p = Patient::from_json(json).unwrap();
    assert_eq!(p.sex, Sex::Male);
    assert_eq!(p.len(), 1);
    assert_eq!(p.encounters()[0].systolic_percentile, 61.0);

    assert!(Patient::from_json(r#"{"sex": "unknown", "encounters": []}"#).is_err());
}

#[test]
fn test_chart_settings_defaults() {
    let settings = ChartSettings::default();
    assert_eq!(settings.recent_count, 3);
    assert_eq!(settings.short_term.container_id, "holder_short");
    assert_eq!(settings.long_term_systolic.container_id, "holder_long_s");
    assert_eq!(settings.long_term_diastolic.container_id, "holder_long_d");
    assert_eq!(settings.table_container_id, "holder_table");
}

#[test]
fn test_chart_settings_from_partial_json() {
    let json = r#"{
        "recent_count": 5,
        "long_term_diastolic": { "container_id": "diastolic", "even_spacing": true }
    }"#;
    let settings = ChartSettings::from_json(json).unwrap();
    assert_eq!(settings.recent_count, 5);
    assert_eq!(settings.short_term, ViewSettings::short_term());
    assert_eq!(settings.long_term_diastolic.container_id, "diastolic");
    assert!(settings.long_term_diastolic.even_spacing);
    assert_eq!(settings.long_term_diastolic.width, 720.0);

    assert!(ChartSettings::from_json("[1, 2]").is_err());
}
