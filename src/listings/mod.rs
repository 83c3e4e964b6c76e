use crate::models::Listing;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{info, warn};

/// Load the listing table from a CSV file.
///
/// Headers may be Spanish (`id,titulo,zona,precio,num_hab,m2,desc`) or
/// English (`id,title,zone,price,num_rooms,area,description`). A missing file
/// gives an empty table.
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Listing table {} not found, using an empty table", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    let listings = load_listings_from_reader(file)
        .with_context(|| format!("Failed to parse listings from {}", path.display()))?;

    info!("📋 Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Parse listings from CSV data with a header row
pub fn load_listings_from_reader(reader: impl Read) -> Result<Vec<Listing>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings = Vec::new();
    for (row, record) in csv_reader.deserialize::<Listing>().enumerate() {
        let listing = record.with_context(|| format!("Invalid listing on row {}", row + 1))?;
        listings.push(listing);
    }

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPANISH_CSV: &str = "\
id,titulo,zona,precio,num_hab,m2,desc
1,Piso en Sol,Madrid Centro,1100,2,65,piso luminoso con balcón
2,Piso en Lavapiés,Madrid Centro,1300,2,70,piso oscuro
";

    #[test]
    fn test_spanish_headers() {
        let listings = load_listings_from_reader(SPANISH_CSV.as_bytes()).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Piso en Sol");
        assert_eq!(listings[0].zone, "Madrid Centro");
        assert_eq!(listings[0].price, 1100.0);
        assert_eq!(listings[0].rooms, 2);
        assert_eq!(listings[0].area, 65.0);
        assert_eq!(listings[1].description, "piso oscuro");
    }

    #[test]
    fn test_english_headers() {
        let data = "id,title,zone,price,num_rooms,area,description\n\
                    7, Loft , Malasaña ,950.5,1,40,\"open plan, terraza\"\n";
        let listings = load_listings_from_reader(data.as_bytes()).unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Loft");
        assert_eq!(listings[0].zone, "Malasaña");
        assert_eq!(listings[0].price, 950.5);
        assert_eq!(listings[0].description, "open plan, terraza");
    }

    #[test]
    fn test_float_room_count() {
        let data = "id,titulo,zona,precio,num_hab,m2,desc\n1,Piso,Retiro,900,2.0,50,x\n";
        let listings = load_listings_from_reader(data.as_bytes()).unwrap();
        assert_eq!(listings[0].rooms, 2);

        let data = "id,titulo,zona,precio,num_hab,m2,desc\n1,Piso,Retiro,900,2.5,50,x\n";
        assert!(load_listings_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_invalid_row_is_an_error() {
        let data = "id,titulo,zona,precio,num_hab,m2,desc\n1,Piso,Retiro,barato,2,50,x\n";
        let err = load_listings_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let listings = load_listings(dir.path().join("nope.csv")).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SPANISH_CSV.as_bytes()).unwrap();

        let listings = load_listings(file.path()).unwrap();
        assert_eq!(listings.len(), 2);
    }
}
