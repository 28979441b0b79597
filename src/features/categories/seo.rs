//! Landing-page copy for category grids.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySeo {
    pub h1: String,
    pub intro: String,
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_path: String,
}

struct SeoCopy {
    slug: &'static str,
    h1: &'static str,
    intro: &'static str,
    meta_description: &'static str,
}

const FALLBACK_INTRO: &str = "Šioje kategorijoje talpinami ir reklamuojami teminiai tinklalapiai. \
     Ilgalaikė internetinė reklama su aiškia metine kaina ir pastovia pozicija kataloge.";
const FALLBACK_DESCRIPTION: &str = "Teminių puslapių reklama: ilgalaikė reklama internete su aiškia metine kaina. \
     Internetinė reklama nišiniuose tinklalapiuose.";

const CATEGORY_COPY: &[SeoCopy] = &[
    SeoCopy {
        slug: "informacija",
        h1: "Informacinių puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami ir talpinami informaciniai tinklalapiai: katalogai, informacijos centrai, archyvai, paieškos sistemos, enciklopedijos, kalendoriai, parodų ir konferencijų projektai, orų prognozės, receptai ir TV programos.",
        meta_description: "Informacinių puslapių reklama: katalogai, informacijos centrai, archyvai, enciklopedijos, orų prognozės ir TV programų svetainės. Ilgalaikė reklama internete su aiškia metine kaina.",
    },
    SeoCopy {
        slug: "iniciatyvos",
        h1: "Iniciatyvų puslapių reklama",
        intro: "Čia reklamuojami socialinių ir pilietinių iniciatyvų tinklalapiai: nevyriausybinės organizacijos, bendruomenių projektai, savanorystės platformos, paramos ir pagalbos iniciatyvos, kampanijos ir akcijos.",
        meta_description: "Iniciatyvų puslapių reklama: NVO, bendruomenių projektai, savanorystės ir paramos iniciatyvų svetainės. Internetinė reklama, padedanti matytis geriems projektams.",
    },
    SeoCopy {
        slug: "kultura-menas",
        h1: "Kultūros ir meno puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami kultūros ir meno projektų tinklalapiai: teatrai, kino ir muzikos festivaliai, muziejai, galerijos, kultūros centrai, koncertų organizatoriai, kūrybinės dirbtuvės ir menininkų projektai.",
        meta_description: "Kultūros ir meno puslapių reklama: teatrai, festivaliai, muziejai, galerijos ir kultūros centrų svetainės. Ilgalaikė internetinė reklama kultūros projektams.",
    },
    SeoCopy {
        slug: "nekilnojamas-turtas",
        h1: "Nekilnojamo turto puslapių reklama",
        intro: "Čia talpinami ir reklamuojami nekilnojamo turto tematikos tinklalapiai: NT portalai, brokerių ir agentūrų svetainės, statybos projektai, nuomos ir pardavimo skelbimų puslapiai.",
        meta_description: "Nekilnojamo turto puslapių reklama: NT portalai, brokerių ir agentūrų svetainės, statybos projektų ir skelbimų puslapiai. Reklama internete su aiškia metine kaina.",
    },
    SeoCopy {
        slug: "parduotuves",
        h1: "Internetinių parduotuvių reklama",
        intro: "Šioje kategorijoje reklamuojamos internetinės parduotuvės ir prekybos platformos: bendri e-komercijos portalai, nišinės e-parduotuvės, marketplace'ai ir kataloginiai parduotuvių puslapiai.",
        meta_description: "Internetinių parduotuvių puslapių reklama: el. parduotuvės, prekybos portalai ir marketplace'ai. Ilgalaikė internetinė reklama pardavimams didinti.",
    },
    SeoCopy {
        slug: "paslaugos",
        h1: "Paslaugų puslapių reklama",
        intro: "Čia talpinami ir reklamuojami įvairių paslaugų tinklalapiai: teisinės ir finansinės paslaugos, buhalterija, marketingas, konsultacijos, meistrai ir remontas, švaros paslaugos, renginių organizatoriai ir kiti B2B / B2C paslaugų puslapiai.",
        meta_description: "Paslaugų puslapių reklama: teisinės, finansinės, marketingo, remonto ir kitų paslaugų svetainės. Puslapių reklama su aiškia reklama internete kaina.",
    },
    SeoCopy {
        slug: "pramogos",
        h1: "Pramogų puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami pramogų ir laisvalaikio tinklalapiai: renginių ir bilietų platformos, kino ir koncertų programos, atrakcionai, pramogų parkai bei laisvalaikio idėjų ir pasiūlymų portalai.",
        meta_description: "Pramogų puslapių reklama: renginių, bilietų, pramogų parkų ir laisvalaikio idėjų svetainės. Interneto reklama aktyviai auditorijai.",
    },
    SeoCopy {
        slug: "seima-vaikai",
        h1: "Šeimos ir vaikų puslapių reklama",
        intro: "Čia talpinami ir reklamuojami šeimos ir vaikų tematikos tinklalapiai: darželiai ir mokyklos, būreliai, edukaciniai projektai, tėvystės ir šeimos portalai, stovyklos bei užimtumo programos.",
        meta_description: "Šeimos ir vaikų puslapių reklama: darželių, mokyklų, būrelių, stovyklų ir šeimos portalų svetainės. Internetinė reklama tikslinei auditorijai.",
    },
    SeoCopy {
        slug: "sportas-pomegiai",
        h1: "Sporto ir pomėgių puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami sporto ir pomėgių tinklalapiai: sporto klubai ir treneriai, sporto prekių parduotuvės, klubai ir būreliai, žvejybos, medžioklės, žaidimų ir kitų hobio sričių puslapiai.",
        meta_description: "Sporto ir pomėgių puslapių reklama: sporto klubų, trenerių, hobio ir laisvalaikio projektų svetainės. Ilgalaikė reklama internetu aktyviems lankytojams.",
    },
    SeoCopy {
        slug: "sveikata-grozis",
        h1: "Sveikatos ir grožio puslapių reklama",
        intro: "Čia talpinami ir reklamuojami sveikatos ir grožio tematikos tinklalapiai: klinikos, odontologai, medicinos centrai, grožio salonai, SPA, reabilitacijos ir sveikatinimo programų svetainės, mitybos ir savijautos projektai.",
        meta_description: "Sveikatos ir grožio puslapių reklama: klinikų, odontologų, medicinos centrų, grožio salonų ir SPA svetainės. Ilgalaikė internetinė reklama su aiškia metine kaina.",
    },
    SeoCopy {
        slug: "technologijos",
        h1: "Technologijų puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami technologijų ir IT projektų tinklalapiai: technologijų portalai, programinės įrangos projektai, SaaS sprendimai, hostingo ir serverių paslaugos, elektronikos ir IT įmonių svetainės.",
        meta_description: "Technologijų puslapių reklama: IT, programinės įrangos, SaaS ir technologijų įmonių svetainės. Internetinė reklama skaitmeniniam verslui.",
    },
    SeoCopy {
        slug: "transportas",
        h1: "Transporto puslapių reklama",
        intro: "Čia talpinami ir reklamuojami transporto ir logistikos tinklalapiai: automobilių pardavimo ir nuomos svetainės, logistikos ir pervežimų įmonės, krovinių ir siuntų tarnybos, viešojo transporto projektai.",
        meta_description: "Transporto puslapių reklama: automobilių, nuomos, logistikos ir pervežimų įmonių svetainės. Ilgalaikė reklama internete transporto sektoriui.",
    },
    SeoCopy {
        slug: "turizmas-keliones",
        h1: "Turizmo ir kelionių puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami turizmo ir kelionių tinklalapiai: kelionių agentūros, apgyvendinimo svetainės, gidai, lankytinų vietų portalai, stovyklos ir poilsio projektai.",
        meta_description: "Turizmo ir kelionių puslapių reklama: kelionių agentūrų, apgyvendinimo, gidų ir lankytinų vietų svetainės. Interneto reklama keliautojų auditorijai.",
    },
    SeoCopy {
        slug: "verslas-finansai",
        h1: "Verslo ir finansų puslapių reklama",
        intro: "Čia talpinami ir reklamuojami verslo ir finansų tematikos tinklalapiai: bankai ir kredito įstaigos, investavimo ir draudimo projektai, verslo konsultacijų puslapiai, B2B paslaugų platformos, verslo naujienų portalai.",
        meta_description: "Verslo ir finansų puslapių reklama: bankų, finansų, investavimo ir verslo naujienų svetainės. Internetinė reklama su aiškia metine kaina.",
    },
    SeoCopy {
        slug: "ziniasklaida",
        h1: "Žiniasklaidos puslapių reklama",
        intro: "Šioje kategorijoje reklamuojami žiniasklaidos ir turinio projektų tinklalapiai: naujienų portalai, internetiniai žurnalai, tinklaraščiai, podcastų ir vaizdo turinio platformos.",
        meta_description: "Žiniasklaidos puslapių reklama: naujienų portalai, žurnalai, tinklaraščiai ir turinio platformos. Ilgalaikė internetinė reklama su stabilia pozicija kataloge.",
    },
];

/// Copy for the homepage VIP grid
pub fn vip_seo() -> CategorySeo {
    CategorySeo {
        h1: "VIP reklamos zona".to_string(),
        intro: "Išskirtinės reklamos vietos su didžiausia ekspozicija.".to_string(),
        meta_title: "Internetinė reklama – VIP zona".to_string(),
        meta_description: "Internetinė reklama VIP zonoje: aukščiausios eilės reklamos vietos su didžiausiu matomumu ir aiškia metine kaina.".to_string(),
        canonical_path: "/".to_string(),
    }
}

/// Copy for a themed category; unknown slugs get a generic text built from the name
pub fn category_seo(slug: &str, name: &str) -> CategorySeo {
    let canonical_path = format!("/{}", slug);

    match CATEGORY_COPY.iter().find(|copy| copy.slug == slug) {
        Some(copy) => CategorySeo {
            h1: copy.h1.to_string(),
            intro: copy.intro.to_string(),
            meta_title: copy.h1.to_string(),
            meta_description: copy.meta_description.to_string(),
            canonical_path,
        },
        None => {
            let base = if name.trim().is_empty() { "Teminių" } else { name };
            let h1 = format!("{} puslapių reklama", base);
            CategorySeo {
                meta_title: h1.clone(),
                h1,
                intro: FALLBACK_INTRO.to_string(),
                meta_description: FALLBACK_DESCRIPTION.to_string(),
                canonical_path,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_copy() {
        let seo = category_seo("pramogos", "Pramogos");
        assert_eq!(seo.h1, "Pramogų puslapių reklama");
        assert_eq!(seo.meta_title, seo.h1);
        assert_eq!(seo.canonical_path, "/pramogos");
    }

    #[test]
    fn test_unknown_category_falls_back_to_name() {
        let seo = category_seo("zvejyba", "Žvejyba");
        assert_eq!(seo.h1, "Žvejyba puslapių reklama");
        assert_eq!(seo.intro, FALLBACK_INTRO);

        assert_eq!(category_seo("x", " ").h1, "Teminių puslapių reklama");
    }

    #[test]
    fn test_vip_copy_points_to_homepage() {
        assert_eq!(vip_seo().canonical_path, "/");
    }
}
