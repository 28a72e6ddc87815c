//! Loading guides from real files and resolving against them.

use std::io::Write;
use std::path::PathBuf;

use fare_server::domain::{District, Fare};
use fare_server::guide::{GuideError, GuideFormat, GuideSource, load};
use fare_server::resolver::{FareRequest, ResolveError, ResolverConfig, RouteResolver};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn district(n: u32) -> District {
    District::new(n).unwrap()
}

fn fare(s: &str) -> Fare {
    Fare::parse(s).unwrap()
}

fn config() -> ResolverConfig {
    ResolverConfig::new(fare("10"))
}

fn descriptions(quote: &fare_server::domain::FareQuote) -> Vec<&str> {
    quote.segments().iter().map(|s| s.description()).collect()
}

// ============================================================================
// Bundled sample guides
// ============================================================================

#[test]
fn sample_text_guide_resolves_keyed_routes() {
    let guide = load(&GuideSource::inferred(data("fare_guide.txt"))).unwrap();
    assert_eq!(guide.len(), 2);

    let config = config();
    let resolver = RouteResolver::new(&guide, &config);

    let quote = resolver
        .resolve(&FareRequest::new(district(1), "nasugbu").with_trike(true))
        .unwrap();
    assert_eq!(
        descriptions(&quote),
        vec!["Nasugbu to Balayan", "Balayan to Grand Terminal", "Grand Terminal to BSU"]
    );
    assert_eq!(quote.segment_total(), fare("151"));
    assert_eq!(quote.trike_fare(), fare("15.1"));
    assert_eq!(quote.total_fare(), fare("166.1"));

    // Keyed districts only answer the keys they list
    let err = resolver
        .resolve(&FareRequest::new(district(1), "Calaca").to("Balayan"))
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoRoute { .. }));
}

#[test]
fn sample_table_guide_resolves_by_search() {
    let source = GuideSource::inferred(data("fare_guide.csv"));
    assert_eq!(source.format(), GuideFormat::Table);

    let guide = load(&source).unwrap();
    let config = config();
    let resolver = RouteResolver::new(&guide, &config);

    let quote = resolver.resolve(&FareRequest::new(district(5), "Bauan")).unwrap();
    assert_eq!(descriptions(&quote), vec!["Bauan to Capitolio", "Capitolio to BSU"]);
    assert_eq!(quote.total_fare(), fare("48"));

    let quote = resolver.resolve(&FareRequest::new(district(6), "Ibaan")).unwrap();
    assert_eq!(quote.segments().len(), 3);
    assert_eq!(quote.total_fare(), fare("61"));

    // Segments are travelled backwards when needed
    let quote = resolver
        .resolve(&FareRequest::new(district(5), "BSU").to("Alangilan"))
        .unwrap();
    assert_eq!(descriptions(&quote), vec!["BSU to Capitolio", "Capitolio to Alangilan"]);
    assert_eq!(quote.total_fare(), fare("26"));
}

// ============================================================================
// Files on disk
// ============================================================================

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let err = load(&GuideSource::inferred(&path)).unwrap_err();
    assert!(matches!(err, GuideError::NotFound { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn csv_extension_selects_table_form() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "district,start_location,destination,vehicle,description,fare").unwrap();
    writeln!(file, "3,A,B,jeep,A to B,12.50").unwrap();
    file.flush().unwrap();

    let source = GuideSource::inferred(file.path());
    assert_eq!(source.format(), GuideFormat::Table);

    let guide = load(&source).unwrap();
    assert_eq!(guide.get(district(3)).map(|c| c.form()), Some("flat"));
}

#[test]
fn explicit_format_overrides_extension() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "District 4:").unwrap();
    writeln!(file, "A - B:").unwrap();
    writeln!(file, "A to B,bus,30").unwrap();
    file.flush().unwrap();

    let guide = load(&GuideSource::new(file.path(), GuideFormat::Text)).unwrap();
    assert_eq!(guide.get(district(4)).map(|c| c.form()), Some("keyed"));
}

#[test]
fn unusable_contents_are_format_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"District 1:\n\xff\xfe A - B:\n").unwrap();
    file.flush().unwrap();
    let err = load(&GuideSource::new(file.path(), GuideFormat::Text)).unwrap_err();
    assert!(matches!(err, GuideError::Format { .. }));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "just some notes").unwrap();
    file.flush().unwrap();
    let err = load(&GuideSource::new(file.path(), GuideFormat::Text)).unwrap_err();
    assert_eq!(err.to_string(), "malformed fare guide: no district headers found");
}
