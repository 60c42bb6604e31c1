//! Static content catalog
//!
//! Post categories with their prompt descriptions, image-prompt templates,
//! hashtag sets, and pre-authored fallback posts. Categories are a fixed
//! enumeration; everything dynamic lives in configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Post categories, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WebDesignTip,
    IndustryInsight,
    BehindTheScenes,
    LocalCommunity,
    TechTrends,
    BusinessTip,
    ClientSpotlight,
    SeoTips,
    MobileDesign,
}

impl Category {
    /// All categories in rotation order
    pub const ALL: [Category; 9] = [
        Category::WebDesignTip,
        Category::IndustryInsight,
        Category::BehindTheScenes,
        Category::LocalCommunity,
        Category::TechTrends,
        Category::BusinessTip,
        Category::ClientSpotlight,
        Category::SeoTips,
        Category::MobileDesign,
    ];

    /// Returns the static descriptor for this category
    pub fn descriptor(&self) -> &'static CategoryDescriptor {
        match self {
            Category::WebDesignTip => &WEB_DESIGN_TIP,
            Category::IndustryInsight => &INDUSTRY_INSIGHT,
            Category::BehindTheScenes => &BEHIND_THE_SCENES,
            Category::LocalCommunity => &LOCAL_COMMUNITY,
            Category::TechTrends => &TECH_TRENDS,
            Category::BusinessTip => &BUSINESS_TIP,
            Category::ClientSpotlight => &CLIENT_SPOTLIGHT,
            Category::SeoTips => &SEO_TIPS,
            Category::MobileDesign => &MOBILE_DESIGN,
        }
    }

    /// The category following this one in rotation order, wrapping around
    pub fn next(&self) -> Category {
        let idx = Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len() - 1);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::WebDesignTip => "web_design_tip",
            Category::IndustryInsight => "industry_insight",
            Category::BehindTheScenes => "behind_the_scenes",
            Category::LocalCommunity => "local_community",
            Category::TechTrends => "tech_trends",
            Category::BusinessTip => "business_tip",
            Category::ClientSpotlight => "client_spotlight",
            Category::SeoTips => "seo_tips",
            Category::MobileDesign => "mobile_design",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web_design_tip" => Ok(Category::WebDesignTip),
            "industry_insight" => Ok(Category::IndustryInsight),
            "behind_the_scenes" => Ok(Category::BehindTheScenes),
            "local_community" => Ok(Category::LocalCommunity),
            "tech_trends" => Ok(Category::TechTrends),
            "business_tip" => Ok(Category::BusinessTip),
            "client_spotlight" => Ok(Category::ClientSpotlight),
            "seo_tips" => Ok(Category::SeoTips),
            "mobile_design" => Ok(Category::MobileDesign),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Static description of a post category
#[derive(Debug)]
pub struct CategoryDescriptor {
    /// Instruction sentence handed to the content generator
    pub description: &'static str,
    /// Image-prompt template for this category
    pub image_prompt: &'static str,
    /// Category hashtags, always included in the post
    pub hashtags: &'static [&'static str],
    /// Pre-authored post used after the retry cap is exhausted
    pub fallback_post: &'static str,
}

/// General brand hashtag pool mixed into every post
pub const BRAND_HASHTAGS: &[&str] = &[
    "#FishtownWebDesign",
    "#PhillyWebDesign",
    "#WebDesign",
    "#DigitalMarketing",
    "#Philadelphia",
    "#SmallBusiness",
    "#WebDevelopment",
    "#UXDesign",
    "#LocalBusiness",
    "#Fishtown",
    "#PhillyBusiness",
    "#WebsiteDesign",
    "#DigitalAgency",
    "#Branding",
    "#SEO",
];

/// Shared quality suffix appended to every image prompt
pub const IMAGE_QUALITY_SETTINGS: &str = "high quality, professional photography, \
    clean composition, no text, no words, no letters, minimalist design";

static WEB_DESIGN_TIP: CategoryDescriptor = CategoryDescriptor {
    description: "Share a practical web design tip that small businesses can \
        implement immediately. Make it actionable and valuable.",
    image_prompt: "Flat design vector illustration in Canva style for a web design \
        tip. Bold sans-serif text overlay, simple website and laptop icons, pastel \
        background, lots of whitespace, clean and modern.",
    hashtags: &["#WebDesign", "#UXDesign", "#WebsiteDesign", "#DigitalDesign"],
    fallback_post: "Quick web design tip: make sure your website loads in under 3 \
        seconds! Speed matters for both user experience and SEO. Need help \
        optimizing your site? We're here to help!",
};

static INDUSTRY_INSIGHT: CategoryDescriptor = CategoryDescriptor {
    description: "Share an insight about web design trends, digital marketing, or \
        technology that affects small businesses.",
    image_prompt: "Flat design vector illustration in Canva style for industry \
        insight. Bold sans-serif text overlay, modern tech and web icons, pastel \
        background, clean layout, lots of whitespace.",
    hashtags: &[
        "#DigitalMarketing",
        "#WebDesign",
        "#IndustryInsights",
        "#TechTrends",
    ],
    fallback_post: "Did you know? 57% of users won't recommend a business with a \
        poorly designed mobile website. Your site is doing sales work around the \
        clock, make sure it's pulling its weight.",
};

static BEHIND_THE_SCENES: CategoryDescriptor = CategoryDescriptor {
    description: "Show the human side of web design. Share something about the \
        team, creative process, or digital workspace. Focus on collaboration, \
        creativity, and the digital tools we use.",
    image_prompt: "Flat design vector illustration in Canva style showing a \
        creative workspace or team collaboration. Bold text overlay, simple icons, \
        pastel background, clean and modern.",
    hashtags: &[
        "#BehindTheScenes",
        "#WebDesign",
        "#TeamWork",
        "#CreativeProcess",
    ],
    fallback_post: "Every site we ship starts the same way: a blank canvas, a lot \
        of coffee, and a conversation about what your customers actually need. \
        The pixels come later.",
};

static LOCAL_COMMUNITY: CategoryDescriptor = CategoryDescriptor {
    description: "Connect with the Fishtown/Philadelphia community. Mention local \
        events, businesses, or community initiatives.",
    image_prompt: "Flat design vector illustration in Canva style representing the \
        Fishtown/Philadelphia community. Community icons, local landmarks, bold \
        text overlay, pastel background, clean layout.",
    hashtags: &["#Fishtown", "#Philadelphia", "#LocalBusiness", "#Community"],
    fallback_post: "Love our Fishtown community! Supporting local businesses is \
        what we're all about. What's your favorite local spot in the neighborhood? \
        Share below!",
};

static TECH_TRENDS: CategoryDescriptor = CategoryDescriptor {
    description: "Discuss a relevant technology trend that small business owners \
        should know about.",
    image_prompt: "Flat design vector illustration in Canva style for tech trends. \
        Modern technology icons, bold sans-serif text, pastel background, clean \
        and minimalist.",
    hashtags: &[
        "#TechTrends",
        "#WebDesign",
        "#Innovation",
        "#DigitalTransformation",
    ],
    fallback_post: "The future of web design is here! AI-powered tools are \
        revolutionizing how we create websites. But remember, human creativity \
        and strategy still drive the best results.",
};

static BUSINESS_TIP: CategoryDescriptor = CategoryDescriptor {
    description: "Share a business tip related to digital presence, marketing, or \
        online success.",
    image_prompt: "Flat design vector illustration in Canva style for a business \
        tip. Bold text overlay, business and marketing icons, pastel background, \
        clean and professional.",
    hashtags: &[
        "#BusinessTips",
        "#SmallBusiness",
        "#DigitalMarketing",
        "#Entrepreneur",
    ],
    fallback_post: "Business tip: your website is often the first impression \
        potential customers have of your business. Make it count! Professional \
        design builds trust and credibility.",
};

static CLIENT_SPOTLIGHT: CategoryDescriptor = CategoryDescriptor {
    description: "Share a success story about a client project, highlighting the \
        results and impact on their business. Focus on local Philadelphia \
        businesses when possible.",
    image_prompt: "Flat design vector illustration in Canva style for a client \
        spotlight. Business icons, success symbols, bold text overlay, pastel \
        background, clean and modern.",
    hashtags: &[
        "#ClientSpotlight",
        "#SuccessStory",
        "#WebDesign",
        "#LocalBusiness",
    ],
    fallback_post: "Client spotlight: we recently helped a local Fishtown \
        restaurant launch a site that lifted their online orders by 40%. Great \
        food plus a great website equals happy customers.",
};

static SEO_TIPS: CategoryDescriptor = CategoryDescriptor {
    description: "Share practical SEO tips and strategies that help small \
        businesses improve their online visibility and search rankings.",
    image_prompt: "Flat design vector illustration in Canva style for SEO tips. \
        Search icons, graph/chart elements, bold text overlay, pastel background, \
        clean and modern.",
    hashtags: &[
        "#SEO",
        "#SearchEngineOptimization",
        "#DigitalMarketing",
        "#WebDesign",
    ],
    fallback_post: "SEO tip: page titles and meta descriptions are still the \
        cheapest wins in search. Write them for humans first and the rankings \
        tend to follow.",
};

static MOBILE_DESIGN: CategoryDescriptor = CategoryDescriptor {
    description: "Share insights about mobile-first design, responsive websites, \
        and mobile user experience best practices.",
    image_prompt: "Flat design vector illustration in Canva style for mobile \
        design. Smartphone and tablet icons, responsive web elements, bold text \
        overlay, pastel background, clean and modern.",
    hashtags: &[
        "#MobileDesign",
        "#ResponsiveDesign",
        "#UXDesign",
        "#MobileFirst",
    ],
    fallback_post: "More than half of your visitors are on a phone right now. \
        If your site makes them pinch and zoom, they're already on a \
        competitor's. Mobile-first isn't a trend, it's table stakes.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_complete_descriptor() {
        for category in Category::ALL {
            let desc = category.descriptor();
            assert!(!desc.description.is_empty(), "{} description", category);
            assert!(!desc.image_prompt.is_empty(), "{} image prompt", category);
            assert!(!desc.hashtags.is_empty(), "{} hashtags", category);
            assert!(!desc.fallback_post.is_empty(), "{} fallback", category);
        }
    }

    #[test]
    fn test_rotation_visits_every_category_once() {
        let mut current = Category::ALL[0];
        let mut seen = vec![current];
        for _ in 1..Category::ALL.len() {
            current = current.next();
            assert!(!seen.contains(&current), "{} repeated", current);
            seen.push(current);
        }
        // Wraps back to the start
        assert_eq!(current.next(), Category::ALL[0]);
    }

    #[test]
    fn test_display_and_from_str_round_trip() {
        for category in Category::ALL {
            let name = category.to_string();
            let parsed: Category = name.parse().expect("Failed to parse");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_category() {
        let result = "holiday_special".parse::<Category>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown category"));
    }

    #[test]
    fn test_hashtags_are_well_formed() {
        for tag in BRAND_HASHTAGS {
            assert!(tag.starts_with('#'));
            assert!(!tag.contains(' '));
        }
        for category in Category::ALL {
            for tag in category.descriptor().hashtags {
                assert!(tag.starts_with('#'), "{}: {}", category, tag);
            }
        }
    }
}
