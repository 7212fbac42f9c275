//! Relationship detail panel state.
//!
//! Holds the active relationship, which series each chart plots, the active
//! stats tab and the two article link lists. Switching series or tabs only
//! re-plots already fetched data.

use crate::api::{Link, RelationshipDetail};

/// Y series selectable on the gene and disease charts.
///
/// The value is the column index into `[years, publications, citations]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesToggle {
    #[default]
    Publications = 1,
    Citations = 2,
}

impl SeriesToggle {
    pub const ALL: [SeriesToggle; 2] = [SeriesToggle::Publications, SeriesToggle::Citations];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SeriesToggle::Publications => "Publications",
            SeriesToggle::Citations => "Citations",
        }
    }

    /// The other series.
    pub fn flip(self) -> Self {
        match self {
            SeriesToggle::Publications => SeriesToggle::Citations,
            SeriesToggle::Citations => SeriesToggle::Publications,
        }
    }
}

/// Which of the two link lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSide {
    Gene,
    Disease,
}

/// A link list with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList {
    pub links: Vec<Link>,
    pub selected: usize,
}

impl LinkList {
    pub fn set(&mut self, links: Vec<Link>) {
        self.links = links;
        self.selected = 0;
    }

    pub fn clear(&mut self) {
        self.set(Vec::new());
    }

    pub fn selected_link(&self) -> Option<&Link> {
        self.links.get(self.selected)
    }

    pub fn move_up(&mut self) {
        if self.links.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.links.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn move_down(&mut self) {
        if self.links.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.links.len();
    }
}

/// Detail panel state for the selected relationship.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    relationship: Option<RelationshipDetail>,
    pub gene_series: SeriesToggle,
    pub disease_series: SeriesToggle,
    active_stat: usize,
    pub gene_links: LinkList,
    pub disease_links: LinkList,
}

impl DetailView {
    /// Show a freshly fetched relationship.
    ///
    /// # Arguments
    /// * `detail` - Relationship detail payload
    /// * `embedded_links` - Fill link lists from the payload instead of waiting
    ///   for article searches
    ///
    /// # Details
    /// Activates the first series toggle of both charts and the first stats tab.
    pub fn select(&mut self, detail: RelationshipDetail, embedded_links: bool) {
        self.gene_series = SeriesToggle::Publications;
        self.disease_series = SeriesToggle::Publications;
        self.active_stat = 0;
        if embedded_links {
            self.gene_links.set(detail.gene_links.clone());
            self.disease_links.set(detail.disease_links.clone());
        } else {
            self.gene_links.clear();
            self.disease_links.clear();
        }
        self.relationship = Some(detail);
    }

    /// Forget the current relationship (e.g. after an empty page).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn relationship(&self) -> Option<&RelationshipDetail> {
        self.relationship.as_ref()
    }

    /// Replace one link list with article search results.
    pub fn set_links(&mut self, side: LinkSide, links: Vec<Link>) {
        self.links_mut(side).set(links);
    }

    pub fn links(&self, side: LinkSide) -> &LinkList {
        match side {
            LinkSide::Gene => &self.gene_links,
            LinkSide::Disease => &self.disease_links,
        }
    }

    pub fn links_mut(&mut self, side: LinkSide) -> &mut LinkList {
        match side {
            LinkSide::Gene => &mut self.gene_links,
            LinkSide::Disease => &mut self.disease_links,
        }
    }

    pub fn toggle_gene(&mut self, series: SeriesToggle) {
        self.gene_series = series;
    }

    pub fn toggle_disease(&mut self, series: SeriesToggle) {
        self.disease_series = series;
    }

    /// Points of the gene chart for the active toggle.
    pub fn gene_points(&self) -> Vec<(f64, f64)> {
        self.relationship
            .as_ref()
            .map(|r| r.gene_data.points(self.gene_series.index()))
            .unwrap_or_default()
    }

    /// Points of the disease chart for the active toggle.
    pub fn disease_points(&self) -> Vec<(f64, f64)> {
        self.relationship
            .as_ref()
            .map(|r| r.disease_data.points(self.disease_series.index()))
            .unwrap_or_default()
    }

    /// Labels of the stats tabs in order.
    pub fn stat_labels(&self) -> Vec<&str> {
        self.relationship
            .as_ref()
            .map(|r| r.stats.iter().map(|s| s.label()).collect())
            .unwrap_or_default()
    }

    fn stat_count(&self) -> usize {
        self.relationship.as_ref().map_or(0, |r| r.stats.len())
    }

    pub fn active_stat(&self) -> usize {
        self.active_stat
    }

    /// Activate stats tab `index`; out-of-range indices are ignored.
    pub fn select_stat(&mut self, index: usize) {
        if index < self.stat_count() {
            self.active_stat = index;
        }
    }

    pub fn next_stat(&mut self) {
        let count = self.stat_count();
        if count > 0 {
            self.active_stat = (self.active_stat + 1) % count;
        }
    }

    pub fn prev_stat(&mut self) {
        let count = self.stat_count();
        if count > 0 {
            self.active_stat = (self.active_stat + count - 1) % count;
        }
    }

    /// Points and y-axis label of the active stats tab.
    pub fn stat_points(&self) -> Option<(Vec<(f64, f64)>, &str)> {
        let stat = self.relationship.as_ref()?.stats.get(self.active_stat)?;
        Some((stat.points(), stat.y_axis_label()))
    }
}
