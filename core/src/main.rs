use clap::Parser;
use cobbmap_core::cli::{Cli, OutputFormat};
use cobbmap_core::{
    AnnotationStateRegistry, CobbAngleMapper, InMemoryCatalog, MappingConfig, Measurement,
    RawAnnotationEvent, Result, TextReport,
};
use log::{error, info, warn};
use std::fs;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {
            warn!("Event {} was skipped", cli.event.display());
            eprintln!("No measurement: the annotation has no metadata or data");
        }
        Err(e) => {
            error!("Mapping failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: &Cli) -> Result<Option<String>> {
    let catalog = load_catalog(cli)?;
    let config = match &cli.config {
        Some(path) => MappingConfig::from_json(&fs::read_to_string(path)?)?,
        None => MappingConfig::default(),
    };

    let mut state = AnnotationStateRegistry::new();
    for uid in &cli.locked {
        state.set_locked(uid.as_str(), true);
    }
    for uid in &cli.hidden {
        state.set_visible(uid.as_str(), false);
    }

    info!("Reading event {}", cli.event.display());
    let event = RawAnnotationEvent::from_json(&fs::read_to_string(&cli.event)?)?;

    let mapper = CobbAngleMapper::new(&catalog, &state).with_config(config);
    match mapper.to_measurement(&event)? {
        Some(measurement) => render(&measurement, &cli.format).map(Some),
        None => Ok(None),
    }
}

fn load_catalog(cli: &Cli) -> Result<InMemoryCatalog> {
    if let Some(path) = &cli.catalog {
        info!("Loading catalog {}", path.display());
        return InMemoryCatalog::from_json(&fs::read_to_string(path)?);
    }
    match &cli.dicom_dir {
        Some(dir) => {
            info!("Scanning DICOM directory {}", dir.display());
            InMemoryCatalog::from_directory(dir)
        }
        None => Ok(InMemoryCatalog::new()),
    }
}

fn render(measurement: &Measurement, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(TextReport::new(measurement).to_string()),
        OutputFormat::Csv => Ok(measurement.build_report().to_csv().trim_end().to_string()),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "measurement": measurement,
                "report": measurement.build_report(),
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const EVENT: &str = r#"{
        "annotation": {
            "annotationUID": "cobb-9",
            "metadata": {
                "toolName": "CobbAngle",
                "referencedImageId": "wadouri:spine.dcm",
                "FrameOfReferenceUID": "FOR9"
            },
            "data": {
                "cachedStats": { "t1": { "angle": 21.456 } },
                "handles": { "points": [[1, 1, 0], [2, 2, 0]] }
            }
        }
    }"#;

    const CATALOG: &str = r#"[{
        "displaySetInstanceUID": "ds-9",
        "StudyInstanceUID": "study-9",
        "SeriesInstanceUID": "series-9",
        "SeriesNumber": 2,
        "instances": [{
            "SOPInstanceUID": "sop-9",
            "InstanceNumber": 5,
            "imageId": "wadouri:spine.dcm"
        }]
    }]"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    fn cli(dir: &TempDir, event: &str, format: OutputFormat) -> Cli {
        Cli {
            event: write(dir, "event.json", event),
            catalog: Some(write(dir, "catalog.json", CATALOG)),
            dicom_dir: None,
            config: None,
            format,
            locked: vec!["cobb-9".to_string()],
            hidden: Vec::new(),
            verbose: false,
        }
    }

    #[test]
    fn test_run_csv() {
        let dir = TempDir::new().unwrap();
        let output = run(&cli(&dir, EVENT, OutputFormat::Csv)).unwrap().unwrap();
        assert_eq!(
            output,
            "AnnotationType,Angle (°),FrameOfReferenceUID,points\nCornerstone:CobbAngle,21.456,FOR9,1 1 0;2 2 0"
        );
    }

    #[test]
    fn test_run_json() {
        let dir = TempDir::new().unwrap();
        let output = run(&cli(&dir, EVENT, OutputFormat::Json)).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["measurement"]["uid"], "cobb-9");
        assert_eq!(json["measurement"]["isLocked"], true);
        assert_eq!(json["measurement"]["displayText"]["secondary"][0], "S: 2 I: 5");
        assert_eq!(json["report"]["columns"][0], "AnnotationType");
    }

    #[test]
    fn test_run_text() {
        let dir = TempDir::new().unwrap();
        let output = run(&cli(&dir, EVENT, OutputFormat::Text)).unwrap().unwrap();
        assert!(output.contains("Primary:        21.46 °"));
        assert!(output.contains("Locked:         true"));
    }

    #[test]
    fn test_run_skipped_event() {
        let dir = TempDir::new().unwrap();
        let event = r#"{"annotation": {"annotationUID": "cobb-9"}}"#;
        assert!(run(&cli(&dir, event, OutputFormat::Text)).unwrap().is_none());
    }

    #[test]
    fn test_run_with_config() {
        let dir = TempDir::new().unwrap();
        let mut cli = cli(&dir, EVENT, OutputFormat::Text);
        cli.config = Some(write(&dir, "config.json", r#"{"supportedTools": ["Length"]}"#));
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_run_rejects_oversized_precision() {
        let dir = TempDir::new().unwrap();
        let mut cli = cli(&dir, EVENT, OutputFormat::Text);
        cli.config = Some(write(&dir, "config.json", r#"{"precision": 320}"#));
        assert!(matches!(run(&cli), Err(cobbmap_core::CobbmapError::InvalidValue(_))));
    }
}
