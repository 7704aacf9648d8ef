use crate::domain::listing::EstateAgent;

// Raw records, one variant per source. Every field is the text exactly as
// scraped; a missing line is carried as "" so normalization can detect it.

#[derive(Debug, Clone, PartialEq)]
pub enum RawListing {
    Central(CentralListing),
    StowBros(StowBrosListing),
    Foxtons(FoxtonsListing),
}

impl RawListing {
    pub fn agent(&self) -> EstateAgent {
        match self {
            RawListing::Central(_) => EstateAgent::Central,
            RawListing::StowBros(_) => EstateAgent::StowBros,
            RawListing::Foxtons(_) => EstateAgent::Foxtons,
        }
    }
}

/// `.thumb-description-height` block plus the beds/baths badges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CentralListing {
    pub address: String,
    pub cost: String,
    pub description: String,
    pub num_beds: String,
    pub num_baths: String,
}

/// One search-results card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StowBrosListing {
    pub address: String,
    pub price: String,
    pub description: Option<String>,
}

/// One `.property_holder` block with its badge line removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoxtonsListing {
    pub address: String,
    pub cost: String,
    pub num_beds: String,
}

/// Everything one run scraped, grouped by source.
#[derive(Debug, Clone, Default)]
pub struct ScrapeBatch {
    pub central: Vec<RawListing>,
    pub stow_bros: Vec<RawListing>,
    pub foxtons: Vec<RawListing>,
}

impl ScrapeBatch {
    pub fn total(&self) -> usize {
        self.central.len() + self.stow_bros.len() + self.foxtons.len()
    }
}
