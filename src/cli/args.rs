//! Command-line argument definitions

use crate::config::ExplorerConfig;
use crate::constants::{SOURCE_LATITUDE_COLUMN, SOURCE_LONGITUDE_COLUMN};
use crate::controller::FilterEvent;
use crate::models::{FilterField, Selection};

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wildlife-explorer")]
#[command(about = "Filter, summarise and export wildlife occurrence records")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Occurrence table (CSV)
    #[arg(value_name = "DATASET_PATH")]
    pub dataset_path: PathBuf,

    /// Case-insensitive text matched against the taxonomy and location fields
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub phylum: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub class: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub species: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub continent: Option<String>,

    /// Country code
    #[arg(long, value_name = "VALUE")]
    pub country: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub state: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub county: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub landcover: Option<String>,

    /// IUCN Red List category code (LC, NT, VU, EN, CR, ...)
    #[arg(long, value_name = "VALUE")]
    pub iucn: Option<String>,

    /// Source column holding longitudes
    #[arg(long, default_value = SOURCE_LONGITUDE_COLUMN)]
    pub lon_column: String,

    /// Source column holding latitudes
    #[arg(long, default_value = SOURCE_LATITUDE_COLUMN)]
    pub lat_column: String,

    /// Keep records whose coordinates fall outside the valid range
    #[arg(long)]
    pub keep_out_of_range: bool,

    /// Table rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Maximum map markers (0 removes the limit)
    #[arg(long)]
    pub max_points: Option<usize>,

    /// Write the filtered records as CSV (defaults to the download directory)
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// List the choices of one filter field and exit
    #[arg(long, value_name = "FIELD")]
    pub options: Option<String>,

    /// Read filter commands from stdin after the first render
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Default configuration with the command-line overrides applied
    pub fn to_config(&self) -> ExplorerConfig {
        let mut config = ExplorerConfig::default()
            .with_coordinate_columns(&self.lon_column, &self.lat_column);

        if self.keep_out_of_range {
            config = config.without_range_validation();
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(max_points) = self.max_points {
            config = config.with_max_points((max_points > 0).then_some(max_points));
        }
        config
    }

    /// Per-field values given on the command line
    pub fn field_values(&self) -> [(FilterField, Option<&str>); 9] {
        [
            (FilterField::Phylum, self.phylum.as_deref()),
            (FilterField::Class, self.class.as_deref()),
            (FilterField::Species, self.species.as_deref()),
            (FilterField::Continent, self.continent.as_deref()),
            (FilterField::CountryCode, self.country.as_deref()),
            (FilterField::State, self.state.as_deref()),
            (FilterField::County, self.county.as_deref()),
            (FilterField::Landcover, self.landcover.as_deref()),
            (FilterField::IucnRedListCategory, self.iucn.as_deref()),
        ]
    }

    /// Events that put the session into the state described by the arguments
    pub fn initial_events(&self) -> Vec<FilterEvent> {
        let mut events: Vec<FilterEvent> = self
            .field_values()
            .into_iter()
            .filter_map(|(field, value)| {
                value.map(|value| FilterEvent::Select(field, Selection::from_choice(value)))
            })
            .collect();

        if let Some(query) = &self.search {
            events.push(FilterEvent::SetQuery(query.clone()));
        }
        events
    }

    /// Export directory, if an export was requested
    pub fn export_dir(&self) -> Option<PathBuf> {
        match &self.export {
            None => None,
            Some(Some(dir)) => Some(dir.clone()),
            Some(None) => Some(default_export_dir()),
        }
    }
}

/// User download directory, falling back to the working directory
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wildlife-explorer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["data.csv"]);

        assert_eq!(args.dataset_path, PathBuf::from("data.csv"));
        assert_eq!(args.get_log_level(), "info");
        assert!(args.initial_events().is_empty());
        assert!(args.export_dir().is_none());

        let config = args.to_config();
        assert_eq!(config.source.longitude_column, "lon_keep");
        assert_eq!(config.map.max_points, Some(1000));
    }

    #[test]
    fn test_filter_flags_become_events() {
        let args = parse(&["data.csv", "--country", "KE", "--iucn", "All", "-s", "leo"]);
        let events = args.initial_events();

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            FilterEvent::Select(FilterField::CountryCode, Selection::Only(v)) if v == "KE"
        ));
        assert!(matches!(
            &events[1],
            FilterEvent::Select(FilterField::IucnRedListCategory, Selection::All)
        ));
        assert!(matches!(&events[2], FilterEvent::SetQuery(q) if q == "leo"));
    }

    #[test]
    fn test_config_overrides() {
        let args = parse(&[
            "data.csv",
            "--lon-column",
            "x",
            "--lat-column",
            "y",
            "--page-size",
            "25",
            "--max-points",
            "0",
            "--keep-out-of-range",
        ]);
        let config = args.to_config();

        assert_eq!(config.source.longitude_column, "x");
        assert_eq!(config.source.latitude_column, "y");
        assert!(!config.source.validate_coordinate_range);
        assert_eq!(config.table.page_size, 25);
        assert_eq!(config.map.max_points, None);
    }

    #[test]
    fn test_export_directory() {
        let explicit = parse(&["data.csv", "--export", "/tmp/out"]);
        assert_eq!(explicit.export_dir(), Some(PathBuf::from("/tmp/out")));

        let implicit = parse(&["data.csv", "--export"]);
        assert_eq!(implicit.export_dir(), Some(default_export_dir()));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["data.csv", "-vv"]).get_log_level(), "trace");
        assert_eq!(parse(&["data.csv", "-q"]).get_log_level(), "warn");
    }
}
