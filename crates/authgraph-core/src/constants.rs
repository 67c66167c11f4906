//! Shared constants for the authority-file pipeline.

/// Default artifact root directory.
pub const DEFAULT_ROOT: &str = "artifacts";

/// Default artifact tag (the source identifier every path is grouped under).
pub const DEFAULT_TAG: &str = "gndzero";

/// Fingerprint used by stages without parameters.
pub const DEFAULT_FINGERPRINT: &str = "artefact";

/// Default number of ids per batched Record Store query.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default authority-file dump URL.
pub const DEFAULT_DUMP_URL: &str =
    "http://datendienst.dnb.de/cgi-bin/mabit.pl?cmd=fetch&userID=opendata&pass=opendata&mabheft=GND.rdf.gz";

/// Default download executable.
pub const DEFAULT_DOWNLOAD_TOOL: &str = "wget";

/// Default decompression executable.
pub const DEFAULT_DECOMPRESS_TOOL: &str = "gunzip";

/// Default external rank executable.
pub const DEFAULT_RANK_EXECUTABLE: &str = "pagerank";

/// Hint shown when the rank executable is missing.
pub const DEFAULT_RANK_HINT: &str = "See: https://github.com/miku/gopagerank";

// ---- Extraction patterns (GND RDF/XML dump) ----

/// Subject URI on the first line of a record block. Group 1 is the id.
pub const DEFAULT_SUBJECT_PATTERN: &str = r#"rdf:about="http://d-nb.info/gnd/([0-9X-]+)">"#;

/// Equivalence link. Group 1 is the opaque target URI.
pub const DEFAULT_SAME_AS_PATTERN: &str = r#"<owl:sameAs rdf:resource="([^"]+)" />"#;

/// Local identifier reference anywhere in a record. Group 1 is the id.
pub const DEFAULT_SUCCESSOR_PATTERN: &str = r"http://d-nb.info/gnd/([0-9X-]+)";

/// Preferred label. Group 1 is the label kind, group 2 the label.
pub const DEFAULT_PREFERRED_NAME_PATTERN: &str = r"<(gnd:preferred[^>]*)>(.*?)</gnd:preferred";
