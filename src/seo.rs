use crate::models::SectionFields;

const SANDBOX: &str = "allow-same-origin allow-forms allow-scripts allow-downloads allow-popups allow-popups-to-escape-sandbox allow-top-navigation-by-user-activation";

pub const CHARTTYPE_ALIASES: &[(&str, &str)] = &[
    ("key stats", "key stats"),
    ("democratic history", "democratic history"),
    ("one-candidates", "candidates"),
    ("two-candidates", "candidates"),
    ("three-candidates", "candidates"),
    ("four-candidates", "candidates"),
    ("candidates", "candidates"),
    ("parliament", "parliament"),
    ("senate parliament", "parliament"),
    ("national parliament", "parliament"),
    ("bar", "bar"),
    ("voting metrics", "voting metrics"),
    ("map", "map"),
    ("voter preference bar", "bar"),
    ("election integrity", "election integrity"),
    ("election representativeness", "election integrity"),
];

#[derive(Debug, Clone, Copy)]
pub struct SeoTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub sandbox: &'static str,
    pub figcaption: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

pub const SEO_TEMPLATES: &[SeoTemplate] = &[
    SeoTemplate {
        key: "key stats",
        title: "{country}'s government Key Stats table",
        sandbox: SANDBOX,
        figcaption: "Key statistics table displaying core political and economic data, including key indicators such as population, GDP, government structure, and democracy metrics in {country}.",
        description: "Explore {country}'s core political and economic data through an informative table detailing key indicators, such as population, GDP, government structure, and democracy metrics.",
        keywords: &[
            "{country} government information",
            "{country} political data",
            "{country} economic data",
            "{country} key indicators",
            "{country} population data",
            "{country} GDP",
            "{country} government structure",
            "{country} president age",
            "{country} president tenure",
            "{country} military regime status",
            "{country} democracy metrics",
            "{country} political and economic overview",
            "{country} leadership indicators",
            "{country} governance metrics",
            "{country} democracy status",
            "{country} core political data",
            "{country} governance landscape",
            "{country} development landscape",
            "{country} system of government",
            "{country} democracy level",
            "{country} leadership details",
            "{country} legislative structure",
            "{country} position in African governance",
            "{country} democratic evolution",
            "When is {country} election?",
            "When will {country} elect president?",
            "{country} democracy",
            "{country} election",
            "{country} democratic history",
            "{country} history since independence",
            "{country} democracy rating",
            "{country} democracy score",
        ],
    },
    SeoTemplate {
        key: "democratic history",
        title: "{country} Historical and political timeline",
        sandbox: SANDBOX,
        figcaption: "History timeline table outlining significant political and economic events, highlighting major milestones such as independence, regime changes, economic reforms, coups, and key developments in {country}.",
        description: "Explore {country}'s rich historical timeline through a detailed table, covering milestones such as {country}'s independence date, referendum history, and pivotal events.",
        keywords: &[
            "{country} historical timeline",
            "political milestones {country}",
            "{country} independence history",
            "{country} referendum history",
            "coups in {country}",
            "notable wars in {country}",
            "assassinations in {country}",
            "fight for freedom in {country}",
            "{country} political development",
            "governance changes in {country}",
            "{country} democracy journey",
            "{country} African governance history",
            "modern political history {country}",
            "landmark events {country}",
            "{country} path to independence",
            "shifts in political power {country}",
            "{country} historical governance",
            "political evolution {country}",
            "key events {country} political history",
            "{country} democracy",
            "{country} election",
            "{country} democratic history",
            "{country} history since independence",
            "{country} democracy rating",
            "{country} democracy score",
        ],
    },
    SeoTemplate {
        key: "candidates",
        title: "{country} {year} presidential Candidates",
        sandbox: SANDBOX,
        figcaption: "Candidate chart displaying the {year} {country} presidential candidates, with key data covering their background, political alignment, and government experience.",
        description: "Explore detailed information on {country}'s presidential candidates, with key data covering their background, political alignment, and government experience.",
        keywords: &[
            "{country} presidential candidates",
            "{country} election",
            "{country} political parties",
            "Presidential candidates biography",
            "Presidential candidates profile",
            "Presidential candidates background",
            "Presidential candidates political career",
            "{country} election results {year}",
            "{country} political history",
            "{country} governance",
            "{country} democracy",
            "{country} leadership",
            "{country} government structure",
            "{country} political landscape",
            "{country} elections",
            "{country} political system",
            "{country} presidential candidate",
            "Who is running for {country} president?",
            "When is {country} election?",
            "When will {country} elect president?",
        ],
    },
    SeoTemplate {
        key: "parliament",
        title: "{country} {year} parliament chart",
        sandbox: SANDBOX,
        figcaption: "Interactive parliamentary election chart displaying the {year} {country} parliamentary election results, illustrating the distribution of seats by political parties.",
        description: "Explore detailed charts on {country}'s parliamentary election results, with number of seats broken down by political parties across election years.",
        keywords: &[
            "{country} parliamentary election results",
            "{country} election results by party",
            "political party performance {country}",
            "{country} election trends",
            "voter shifts {country} elections",
            "political party shifts {country}",
            "{country} election charts",
            "{country} parliamentary seats by party",
            "election trends in {country}",
            "African elections analysis",
            "{country} democracy analysis",
            "{country} election data",
            "{country} voter trends",
            "{country} election performance",
            "{country} political party analysis",
            "{country} democracy trends",
            "election years in {country}",
            "{country} political party results",
            "{country} elections voter shifts",
            "African parliamentary elections",
            "When is {country} election?",
            "When will {country} elect president?",
            "Who won {country} election?",
            "Who won {country} president?",
            "Which party won {country}?",
            "{country} parliament results",
            "{country} legislative control",
            "number of seats by political parties",
            "parliamentary election trends in {country}",
            "{country} political landscape",
            "African elections",
            "{country} democracy",
            "voter shifts {country}",
            "parliamentary election analysis",
            "{year}",
        ],
    },
    SeoTemplate {
        key: "voting metrics",
        title: "{country} Voter metrics chart",
        sandbox: SANDBOX,
        figcaption: "Interactive voting metrics chart displaying the {country} presidential election results, with percentage of registered voters who voted and percentage invalid votes across election years.",
        description: "Explore detailed charts on {country}'s presidential election voter metrics results from 1969 to {year}, including voter turnout percentages and invalid vote statistics across election years.",
        keywords: &[
            "{country} presidential election results",
            "{country} voter turnout",
            "{country} invalid vote statistics",
            "{country} election trends",
            "{country} voter participation",
            "{country} election data",
            "{country} electoral landscape",
            "African elections analysis",
            "{country} democracy trends",
            "{country} election charts",
            "{country} presidential voter metrics",
            "{country} election years 1969-{year}",
            "{country} voter turnout percentages",
            "{country} invalid votes by year",
            "{country} eligible voter trends",
            "{country} election research",
            "{country} political analysis",
            "{country} election observers",
            "{country} elections for students",
            "{country} elections for historians",
            "{country} elections for journalists",
            "{country} elections for civil society",
            "African voter turnout trends",
            "African invalid vote statistics",
            "{country} election visualizations",
            "{country} democracy analysis",
            "{country} democracy",
            "{country} election",
            "{country} election results",
            "{country} historical election results",
            "{country} parliament results",
            "{country} legislative control",
            "{country} presidential election voter metrics results",
            "percentage votes by political parties",
            "percentage of registered voters who voted",
            "percentage invalid votes",
            "election trends in {country}",
            "{country} political landscape",
            "voter shifts {country}",
            "political party performance {country}",
            "presidential election analysis",
            "When is {country} election?",
            "When will {country} elect president?",
            "Who won {country} election?",
            "Who won {country} president?",
            "Which party won in {country}?",
        ],
    },
    SeoTemplate {
        key: "bar",
        title: "{country} {year} total result bar chart",
        sandbox: SANDBOX,
        figcaption: "Bar chart displaying the {year} {country} presidential election results, illustrating how each coalition party performed in terms of percentage of votes received.",
        description: "Explore detailed charts on {country}'s presidential election results, with percentage votes broken down by political parties across election years.",
        keywords: &[
            "{country} democracy",
            "{country} election",
            "{country} presidential election results",
            "{country} election trends",
            "{country} percentage votes by party",
            "{country} political party performance",
            "{country} election analysis",
            "{country} party shifts",
            "{country} voter shifts",
            "{country} presidential vote percentages",
            "African elections analysis",
            "{country} democracy trends",
            "{country} presidential election charts",
            "{country} election years analysis",
            "{country} political trends",
            "{country} party vote breakdown",
            "{country} political analysis",
            "{country} election performance",
            "{country} voter trends",
            "{country} party performance trends",
            "{country} presidential voting data",
            "{country} election visualizations",
            "African democracy analysis",
            "{country} historical election results",
            "{country} electoral insights",
            "{country} election results",
            "percentage votes by political parties",
            "election trends in {country}",
            "{country} political landscape",
            "{country} election charts",
            "presidential election analysis",
            "vote manipulation",
            "When is {country} election?",
            "When will {country} elect president?",
            "nonpartisan",
            "Who won {country} election?",
            "Who won {country} president?",
            "Which party won {country}?",
            "{country} {year} election results",
            "rigging",
            "corruption",
            "{country} voter turnout",
            "{country} subnational results",
            "{country} parliament results",
            "{country} legislative control",
            "{country} election integrity",
            "{country} election audit",
            "{country} election reliability",
            "{country} election observation",
        ],
    },
    SeoTemplate {
        key: "map",
        title: "{country} {year} presidential election map",
        sandbox: SANDBOX,
        figcaption: "Interactive map chart displaying the {year} {country} presidential election results, illustrating how each party and/or candidate performed by region based on the number of votes received.",
        description: "Navigate through our interactive map visualizations of {country}'s presidential election data across regions and election years.",
        keywords: &[
            "{year}",
            "African election maps",
            "African elections",
            "African elections map analysis",
            "Election trends in {country}",
            "Interactive {country} election map",
            "{country} {year} election results",
            "{country} candidate vote counts",
            "{country} democracy",
            "{country} democracy visualizations",
            "{country} election",
            "{country} election audit",
            "{country} election corruption",
            "{country} election data by region",
            "{country} election insights",
            "{country} election integrity",
            "{country} election mapping",
            "{country} election observation",
            "{country} election reliability",
            "{country} election results",
            "{country} election trends by map",
            "{country} electoral geography",
            "{country} electoral maps",
            "{country} historical election results",
            "{country} legislative control",
            "{country} parliament results",
            "{country} political analysis by region",
            "{country} political maps",
            "{country} presidential election data",
            "{country} presidential election map",
            "{country} presidential election results",
            "{country} presidential election visualizations",
            "{country} regional democracy trends",
            "{country} regional election results",
            "{country} regional voting trends",
            "{country} ruling party map",
            "{country} subnational election results",
            "{country} subnational results",
            "{country} vote manipulation",
            "{country} voter turnout",
            "{country} voting patterns",
            "Percentage votes by political parties {country}",
            "Regional voting patterns {country}",
            "Shifting voter trends {country}",
            "When is {country}'s presidential election?",
            "When will {country} elect a president?",
            "Who won {country} president?",
            "Who won {country}'s election?",
            "Which party won in {country}?",
            "nonpartisan",
        ],
    },
    SeoTemplate {
        key: "election integrity",
        title: "{country} Election Integrity Chart",
        sandbox: SANDBOX,
        figcaption: "Election integrity chart displaying observer group estimates, official electoral body data, and discrepancies in vote counts in {country}.",
        description: "Explore {country}'s election integrity data, with observer group estimates and official electoral body estimates across election years.",
        keywords: &[
            "{country} election integrity data",
            "observer group estimates {country}",
            "official electoral body estimates {country}",
            "election integrity trends",
            "parallel vote tabulation data",
            "discrepancies in election results",
            "election observers {country}",
            "election transparency in {country}",
            "pvt",
            "prvt",
            "political party performance {country}",
            "Would the discrepancy have changed who won the overall election results?",
            "Was the winning party the same?",
            "election observers",
            "{country} parliamentary election results",
            "number of seats by political parties",
            "{country} political landscape",
            "African elections",
            "{year}",
            "{country} democracy",
            "voter shifts {country}",
            "{country} election charts",
            "presidential election analysis",
            "When is {country} parliamentary election?",
            "When will {country} elect president?",
            "Who won {country} parliament seats?",
            "Which party won {country} election?",
            "{country} election",
            "{country} parliamentary results",
            "{country} historical election results",
            "{country} voter turnout",
            "{country} subnational results",
            "{country} parliament results",
            "{country} legislative control",
            "{country} election integrity",
            "{country} election audit",
            "{country} election reliability",
            "rigging",
            "corruption",
            "vote manipulation",
            "nonpartisan",
            "{country} election observation",
        ],
    },
];

pub fn parse_seo_keywords(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn normalize_charttype(charttype: &str) -> String {
    let lowered = charttype.to_lowercase();
    CHARTTYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, key)| key.to_string())
        .unwrap_or(lowered)
}

pub fn template_for(charttype: &str) -> Option<&'static SeoTemplate> {
    let key = normalize_charttype(charttype);
    SEO_TEMPLATES.iter().find(|template| template.key == key)
}

#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    country: &'a str,
    year: &'a str,
    year_plus_5: String,
    year_plus_10: String,
    prev_year: String,
    next_year: String,
}

impl<'a> Placeholders<'a> {
    pub fn new(country: &'a str, year: &'a str) -> Self {
        let numeric_year = Some(year)
            .filter(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|y| y.parse::<i32>().ok());
        let offset = |delta: i32| {
            numeric_year
                .map(|y| (y + delta).to_string())
                .unwrap_or_default()
        };

        Self {
            country,
            year,
            year_plus_5: offset(5),
            year_plus_10: offset(10),
            prev_year: offset(-5),
            next_year: offset(5),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "country" => Some(self.country),
            "year" => Some(self.year),
            "year_plus_5" => Some(&self.year_plus_5),
            "year_plus_10" => Some(&self.year_plus_10),
            "prev_year" => Some(&self.prev_year),
            "next_year" => Some(&self.next_year),
            _ => None,
        }
    }

    // Single pass: substituted values are never re-scanned.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let name = &after_open[..close];
            match self.lookup(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after_open[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Writes template text into every SEO field the section left empty. Returns
/// `false` when the chart type has no template; the section is untouched then.
pub fn fill_seo_fields(section: &mut SectionFields, country: &str) -> bool {
    let Some(template) = template_for(section.charttype.as_deref().unwrap_or("")) else {
        return false;
    };

    let year = section.year.clone().unwrap_or_default();
    let placeholders = Placeholders::new(country, &year);

    if is_blank(&section.seo_title) {
        section.seo_title = Some(placeholders.apply(template.title));
    }
    if is_blank(&section.sandbox) {
        section.sandbox = Some(placeholders.apply(template.sandbox));
    }
    if is_blank(&section.seo_figcaption) {
        section.seo_figcaption = Some(placeholders.apply(template.figcaption));
    }
    if is_blank(&section.seo_description) {
        section.seo_description = Some(placeholders.apply(template.description));
    }
    if section.seo_keywords.as_ref().map_or(true, Vec::is_empty) {
        section.seo_keywords = Some(
            template
                .keywords
                .iter()
                .map(|keyword| placeholders.apply(keyword))
                .collect(),
        );
    }

    true
}
