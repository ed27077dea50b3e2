//! Font fallback chain configuration.
//!
//! Defines the priority order of substitute families used when the requested
//! family is not installed.

/// Fallback font families in priority order.
///
/// The order is designed to provide:
/// 1. Dedicated Bengali faces with complete conjunct (juktakkhor) tables
/// 2. Other Indic families that ship Bengali coverage
/// 3. Broad-coverage fonts as a last resort
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Bengali
    "Noto Sans Bengali",
    "Noto Serif Bengali",
    "Noto Sans Bengali UI",
    "Lohit Bengali",
    "Kalpurush",
    "SolaimanLipi",
    "Siyam Rupali",
    "Mukti",
    "Hind Siliguri",
    "Vrinda",
    "Nirmala UI",
    "Bangla MN",
    "Bangla Sangam MN",
    // Multi-script Indic
    "FreeSerif",
    "FreeSans",
    "Mukti Narrow",
    // General fallbacks
    "Noto Sans",
    "DejaVu Sans",
    "Arial Unicode MS",
    "Liberation Sans",
    "Arial",
];
