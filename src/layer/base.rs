//! Base layer resolution and the URL-template tile source.

use walkers::sources::{Attribution, TileSource};
use walkers::TileId;

use crate::options::BaseLayers;

/// URL template of the default public tile source.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution of the default public tile source.
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Display name of the default public tile source.
pub const DEFAULT_TILE_NAME: &str = "OpenStreetMap";

/// One selectable base layer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBaseLayer {
    /// Stable identifier derived from the choice's position.
    pub id: String,
    /// Name shown in the layer switcher.
    pub name: String,
    pub url: String,
    pub attribution: String,
}

/// Outcome of base layer resolution: the ordered choices and whether a
/// switcher is offered for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBaseLayers {
    /// At least one element; the first is selected by default.
    pub choices: Vec<ResolvedBaseLayer>,
    /// `true` only when more than one choice was configured.
    pub selectable: bool,
}

/// Resolves the base layer configuration.
///
/// Absent configuration and an empty `Named` list both produce the single
/// default source. `Single` and one-element `Named` lists produce exactly
/// one source without a switcher; longer lists are offered through the
/// switcher with the first entry pre-selected.
pub fn resolve_base_layers(config: Option<&BaseLayers>) -> ResolvedBaseLayers {
    let default = || ResolvedBaseLayers {
        choices: vec![ResolvedBaseLayer {
            id: String::from("baselayer_0"),
            name: String::from(DEFAULT_TILE_NAME),
            url: String::from(DEFAULT_TILE_URL),
            attribution: String::from(DEFAULT_ATTRIBUTION),
        }],
        selectable: false,
    };

    match config {
        None => default(),
        Some(BaseLayers::Single(source)) => ResolvedBaseLayers {
            choices: vec![ResolvedBaseLayer {
                // Never shown: a lone base layer is not offered in the switcher.
                id: String::from("baselayer_0"),
                name: String::new(),
                url: source.url.clone(),
                attribution: source.attribution.clone(),
            }],
            selectable: false,
        },
        Some(BaseLayers::Named(sources)) if sources.is_empty() => default(),
        Some(BaseLayers::Named(sources)) => ResolvedBaseLayers {
            choices: sources
                .iter()
                .enumerate()
                .map(|(index, source)| ResolvedBaseLayer {
                    id: format!("baselayer_{index}"),
                    name: source.name.clone(),
                    url: source.url.clone(),
                    attribution: source.attribution.clone(),
                })
                .collect(),
            selectable: sources.len() > 1,
        },
    }
}

/// Subdomains rotated through the `{s}` placeholder.
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// A slippy-map tile source built from a `{s}/{z}/{x}/{y}` URL template.
pub struct UrlTemplateSource {
    url: String,
    // The engine's Attribution borrows 'static strs; leaked once per
    // distinct source at construction.
    attribution: &'static str,
}

impl UrlTemplateSource {
    pub fn new(layer: &ResolvedBaseLayer) -> Self {
        Self {
            url: layer.url.clone(),
            attribution: Box::leak(layer.attribution.clone().into_boxed_str()),
        }
    }

    fn fill_template(&self, tile_id: TileId) -> String {
        let subdomain = SUBDOMAINS[tile_id.x.wrapping_add(tile_id.y) as usize % SUBDOMAINS.len()];
        self.url
            .replace("{s}", subdomain)
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }
}

impl TileSource for UrlTemplateSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.fill_template(tile_id)
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: self.attribution,
            url: "",
            logo_light: None,
            logo_dark: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{NamedTileSource, TileSourceSpec};

    fn named(count: usize) -> BaseLayers {
        BaseLayers::Named(
            (0..count)
                .map(|i| NamedTileSource {
                    name: format!("Layer {i}"),
                    url: format!("https://tiles{i}.test/{{z}}/{{x}}/{{y}}.png"),
                    attribution: format!("attribution {i}"),
                })
                .collect(),
        )
    }

    #[test]
    fn test_absent_config_resolves_to_default_source() {
        let resolved = resolve_base_layers(None);
        assert_eq!(resolved.choices.len(), 1);
        assert!(!resolved.selectable);
        assert_eq!(resolved.choices[0].url, DEFAULT_TILE_URL);
        assert_eq!(resolved.choices[0].attribution, DEFAULT_ATTRIBUTION);
    }

    #[test]
    fn test_empty_list_resolves_like_absent_config() {
        let resolved = resolve_base_layers(Some(&named(0)));
        assert_eq!(resolved, resolve_base_layers(None));
    }

    #[test]
    fn test_single_source_is_not_selectable() {
        let config = BaseLayers::Single(TileSourceSpec {
            url: String::from("https://tiles.test/{z}/{x}/{y}.png"),
            attribution: String::from("test tiles"),
        });
        let resolved = resolve_base_layers(Some(&config));
        assert_eq!(resolved.choices.len(), 1);
        assert!(!resolved.selectable);
        assert_eq!(resolved.choices[0].url, "https://tiles.test/{z}/{x}/{y}.png");
        assert_eq!(resolved.choices[0].attribution, "test tiles");
    }

    #[test]
    fn test_one_element_list_behaves_like_single() {
        let resolved = resolve_base_layers(Some(&named(1)));
        assert_eq!(resolved.choices.len(), 1);
        assert!(!resolved.selectable);
        assert_eq!(resolved.choices[0].name, "Layer 0");
    }

    #[test]
    fn test_multiple_sources_are_selectable_in_order() {
        let resolved = resolve_base_layers(Some(&named(3)));
        assert_eq!(resolved.choices.len(), 3);
        assert!(resolved.selectable);
        for (index, choice) in resolved.choices.iter().enumerate() {
            assert_eq!(choice.id, format!("baselayer_{index}"));
            assert_eq!(choice.name, format!("Layer {index}"));
        }
    }

    #[test]
    fn test_url_template_fills_placeholders() {
        let source = UrlTemplateSource::new(&ResolvedBaseLayer {
            id: String::from("baselayer_0"),
            name: String::from("t"),
            url: String::from("https://{s}.tiles.test/{z}/{x}/{y}.png"),
            attribution: String::new(),
        });
        let url = source.tile_url(TileId {
            x: 5,
            y: 7,
            zoom: 9,
        });
        assert_eq!(url, "https://a.tiles.test/9/5/7.png");
    }

    #[test]
    fn test_url_template_without_subdomain_placeholder() {
        let source = UrlTemplateSource::new(&ResolvedBaseLayer {
            id: String::from("baselayer_0"),
            name: String::from("t"),
            url: String::from("https://tiles.test/{z}/{x}/{y}.png"),
            attribution: String::new(),
        });
        let url = source.tile_url(TileId {
            x: 1,
            y: 2,
            zoom: 3,
        });
        assert_eq!(url, "https://tiles.test/3/1/2.png");
    }
}
