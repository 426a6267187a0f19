//! Surah, ayah and page lookups
//!
//! Pure functions over static tables. Every lookup returns `None` for
//! out-of-range input instead of panicking.

mod tables;

use serde::Serialize;

use tables::{PAGE_STARTS, SURAHS};

/// Number of surahs
pub const SURAH_COUNT: u8 = 114;

/// Number of ayahs across all surahs
pub const TOTAL_AYAHS: u16 = 6236;

/// Where a surah was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Revelation {
    Meccan,
    Medinan,
}

/// Static description of a surah
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurahInfo {
    /// 1-based surah number
    pub number: u8,
    pub ayah_count: u16,
    /// Ayahs in all preceding surahs
    pub start_ayah: u16,
    pub name_arabic: &'static str,
    pub name_transliterated: &'static str,
    pub name_english: &'static str,
    pub revelation: Revelation,
    /// Position in revelation order, 1-based
    pub revelation_order: u8,
    pub ruku_count: u8,
}

/// First ayah shown on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AyahLocation {
    pub surah: u8,
    pub ayah: u16,
    /// 0-based page index
    pub page: usize,
}

/// All surahs in order
pub fn surahs() -> &'static [SurahInfo] {
    &SURAHS
}

pub fn surah_info(surah: u8) -> Option<&'static SurahInfo> {
    SURAHS.get(usize::from(surah).checked_sub(1)?)
}

pub fn ayah_count(surah: u8) -> Option<u16> {
    surah_info(surah).map(|info| info.ayah_count)
}

/// 1-based position of an ayah across the whole text
pub fn absolute_ayah(surah: u8, ayah: u16) -> Option<u16> {
    let info = surah_info(surah)?;
    (1..=info.ayah_count).contains(&ayah).then(|| info.start_ayah + ayah)
}

/// 0-based page holding an ayah: the last page whose first ayah does not
/// come after it.
pub fn ayah_page(surah: u8, ayah: u16) -> Option<usize> {
    absolute_ayah(surah, ayah)?;
    let target = (surah, ayah);
    PAGE_STARTS.partition_point(|&start| start <= target).checked_sub(1)
}

/// 0-based page on which a surah begins
pub fn surah_start_page(surah: u8) -> Option<usize> {
    ayah_page(surah, 1)
}

/// First ayah on a 0-based page
pub fn page_location(page: usize) -> Option<AyahLocation> {
    PAGE_STARTS
        .get(page)
        .map(|&(surah, ayah)| AyahLocation { surah, ayah, page })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_totals() {
        assert_eq!(surahs().len(), usize::from(SURAH_COUNT));
        let total: u32 = surahs().iter().map(|s| u32::from(s.ayah_count)).sum();
        assert_eq!(total, u32::from(TOTAL_AYAHS));
    }

    #[test]
    fn test_start_ayah_is_cumulative() {
        let mut running = 0u16;
        for (i, info) in surahs().iter().enumerate() {
            assert_eq!(usize::from(info.number), i + 1);
            assert_eq!(info.start_ayah, running);
            running += info.ayah_count;
        }
    }

    #[test]
    fn test_page_starts_strictly_increase() {
        assert!(PAGE_STARTS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(PAGE_STARTS.len(), 604);
    }

    #[test]
    fn test_surah_info_bounds() {
        assert!(surah_info(0).is_none());
        assert!(surah_info(115).is_none());
        assert_eq!(surah_info(1).map(|s| s.ayah_count), Some(7));
        assert_eq!(surah_info(114).map(|s| s.number), Some(114));
        assert_eq!(ayah_count(2), Some(286));
        assert_eq!(ayah_count(200), None);
    }

    #[test]
    fn test_known_pages() {
        assert_eq!(surah_start_page(1), Some(0));
        assert_eq!(surah_start_page(2), Some(1));
        assert_eq!(ayah_page(2, 5), Some(1));
        assert_eq!(ayah_page(2, 6), Some(2));
        assert_eq!(ayah_page(2, 286), surah_start_page(3));
        assert_eq!(surah_start_page(114), Some(603));
        assert_eq!(surah_start_page(113), Some(603));
    }

    #[test]
    fn test_invalid_ayahs() {
        assert_eq!(ayah_page(1, 0), None);
        assert_eq!(ayah_page(1, 8), None);
        assert_eq!(ayah_page(0, 1), None);
        assert_eq!(absolute_ayah(114, 6), Some(TOTAL_AYAHS));
    }

    #[test]
    fn test_page_location() {
        assert_eq!(page_location(0), Some(AyahLocation { surah: 1, ayah: 1, page: 0 }));
        assert_eq!(page_location(603).map(|l| l.surah), Some(112));
        assert_eq!(page_location(604), None);
    }

    #[test]
    fn test_surah_round_trip() {
        for surah in 1..=SURAH_COUNT {
            let start = surah_start_page(surah).unwrap();
            let count = ayah_count(surah).unwrap();
            for ayah in 1..=count {
                let page = ayah_page(surah, ayah).unwrap();
                assert!(start <= page, "surah {surah} ayah {ayah}");
            }
            if surah < SURAH_COUNT {
                let last = ayah_page(surah, count).unwrap();
                assert!(last <= surah_start_page(surah + 1).unwrap());
            }
        }
    }

    #[test]
    fn test_page_location_maps_back() {
        for page in 0..PAGE_STARTS.len() {
            let loc = page_location(page).unwrap();
            assert_eq!(ayah_page(loc.surah, loc.ayah), Some(page));
        }
    }
}
