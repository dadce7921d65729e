use std::sync::Arc;

use museum_catalog::Artist;
use museum_core::{ArtistId, DomainError, DomainResult, Entity};
use museum_store::Repository;

/// Artist CRUD plus name/country/period lookups.
pub struct ArtistService {
    artists: Arc<dyn Repository<Artist>>,
}

impl ArtistService {
    pub fn new(artists: Arc<dyn Repository<Artist>>) -> Self {
        Self { artists }
    }

    pub fn add_artist(&self, artist: Artist) -> DomainResult<Artist> {
        artist.validate().map_err(reject)?;
        let stored = self.artists.save(artist);
        tracing::info!(id = ?stored.id(), name = %stored.full_name, "artist added");
        Ok(stored)
    }

    pub fn update_artist(&self, artist: Artist) -> DomainResult<Artist> {
        let Some(id) = artist.id() else {
            return Err(reject(DomainError::invalid_data("artist id is required")));
        };
        artist.validate().map_err(reject)?;
        if !self.artists.exists(id) {
            return Err(reject(DomainError::artist_not_found(id)));
        }

        let stored = self.artists.save(artist);
        tracing::info!(id = %id, "artist updated");
        Ok(stored)
    }

    pub fn delete_artist(&self, id: ArtistId) -> DomainResult<()> {
        if !self.artists.delete_by_id(id) {
            return Err(reject(DomainError::artist_not_found(id)));
        }
        tracing::info!(id = %id, "artist deleted");
        Ok(())
    }

    pub fn get_artist(&self, id: ArtistId) -> DomainResult<Artist> {
        self.artists
            .find_by_id(id)
            .ok_or_else(|| DomainError::artist_not_found(id))
    }

    pub fn get_all_artists(&self) -> Vec<Artist> {
        self.artists.find_all()
    }

    /// Case-insensitive substring match on the full name. Blank → empty.
    pub fn search_by_name(&self, name: &str) -> Vec<Artist> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.artists
            .find_matching(&|a: &Artist| a.full_name.to_lowercase().contains(&needle))
    }

    /// Exact country match. Blank → empty.
    pub fn find_by_country(&self, country: &str) -> Vec<Artist> {
        let country = country.trim();
        if country.is_empty() {
            return Vec::new();
        }
        self.artists.find_matching(&|a: &Artist| a.country == country)
    }

    /// Artists whose lifespan overlaps `start..=end`. Living artists count as
    /// alive through `end`.
    pub fn find_by_period(&self, start: i32, end: i32) -> Vec<Artist> {
        self.artists
            .find_matching(&|a: &Artist| a.lived_during(start, end))
    }

    pub fn get_total_count(&self) -> usize {
        self.artists.count()
    }
}

fn reject(err: DomainError) -> DomainError {
    tracing::warn!(error = %err, "artist operation rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_store::InMemoryRepository;

    fn service() -> ArtistService {
        let repo: Arc<InMemoryRepository<Artist>> = InMemoryRepository::arc();
        ArtistService::new(repo)
    }

    fn seeded() -> ArtistService {
        let service = service();
        service
            .add_artist(Artist::new("Vincent van Gogh", 1853, "Netherlands").with_death_year(1890))
            .unwrap();
        service
            .add_artist(Artist::new("Claude Monet", 1840, "France").with_death_year(1926))
            .unwrap();
        service
            .add_artist(Artist::new("Living Painter", 1970, "France"))
            .unwrap();
        service
    }

    #[test]
    fn add_assigns_ids_and_validates() {
        let service = seeded();
        assert_eq!(service.get_total_count(), 3);
        assert_eq!(
            service.get_artist(ArtistId::new(2)).unwrap().full_name,
            "Claude Monet"
        );

        match service.add_artist(Artist::new("Too early", 900, "Nowhere")).unwrap_err() {
            DomainError::InvalidData(_) => {}
            other => panic!("expected InvalidData, got {other:?}"),
        }
        assert_eq!(service.get_total_count(), 3);
    }

    #[test]
    fn update_and_delete_require_existing_record() {
        let service = seeded();
        let mut monet = service.get_artist(ArtistId::new(2)).unwrap();
        monet.biography = "Founder of Impressionism".to_string();
        service.update_artist(monet).unwrap();
        assert_eq!(
            service.get_artist(ArtistId::new(2)).unwrap().biography,
            "Founder of Impressionism"
        );

        let mut ghost = Artist::new("Ghost", 1900, "Nowhere");
        ghost.assign_id(ArtistId::new(99));
        assert!(service.update_artist(ghost).unwrap_err().is_not_found());
        assert!(service.update_artist(Artist::new("No id", 1900, "X")).is_err());

        service.delete_artist(ArtistId::new(1)).unwrap();
        assert_eq!(
            service.get_artist(ArtistId::new(1)).unwrap_err(),
            DomainError::artist_not_found(1u64)
        );
        assert!(service.delete_artist(ArtistId::new(1)).is_err());
    }

    #[test]
    fn lookups() {
        let service = seeded();
        assert_eq!(service.search_by_name("MONET").len(), 1);
        assert!(service.search_by_name(" ").is_empty());
        assert_eq!(service.find_by_country("France").len(), 2);
        assert!(service.find_by_country("france").is_empty());

        let names = |list: Vec<Artist>| {
            list.into_iter().map(|a| a.full_name).collect::<Vec<_>>()
        };
        assert_eq!(
            names(service.find_by_period(1880, 1885)),
            vec!["Vincent van Gogh", "Claude Monet"]
        );
        assert_eq!(names(service.find_by_period(2000, 2010)), vec!["Living Painter"]);
    }
}
