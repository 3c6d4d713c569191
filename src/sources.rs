//! The fixed list of health news outlets scraped on every run.
//!
//! Sources are processed in table order. Adding an outlet means adding a row
//! here and, if its URLs defeat the default link rule, a row in
//! [`crate::scrapers::links`]'s rule table.

use crate::models::Source;

pub const SOURCES: &[Source] = &[
    Source {
        name: "Healthline",
        listing_url: "https://www.healthline.com/health-news",
    },
    Source {
        name: "WebMD",
        listing_url: "https://www.webmd.com/news",
    },
    Source {
        name: "BBC Health",
        listing_url: "https://www.bbc.com/news/health",
    },
    Source {
        name: "The Guardian Health",
        listing_url: "https://www.theguardian.com/society/health",
    },
    Source {
        name: "Irish Times Health",
        listing_url: "https://www.irishtimes.com/health/",
    },
    Source {
        name: "Sky News Health",
        listing_url: "https://news.sky.com/topic/health-10041",
    },
    Source {
        name: "The Local Sweden Health",
        listing_url: "https://www.thelocal.se/tag/health",
    },
    Source {
        name: "ANSA English Health",
        listing_url: "https://www.ansa.it/english/news/science_and_health/",
    },
    Source {
        name: "Medical News Today",
        listing_url: "https://www.medicalnewstoday.com/news",
    },
    Source {
        name: "Mayo Clinic News",
        listing_url: "https://newsnetwork.mayoclinic.org/discussion/",
    },
];
