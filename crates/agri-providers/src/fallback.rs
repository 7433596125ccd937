// Archivo: fallback.rs
// Propósito: respuestas locales deterministas para cuando el modelo no está
// disponible. Se elige por idioma y por palabra clave; el primer grupo que
// coincide gana y, si ninguno coincide, se devuelve la respuesta genérica.
use crate::language::Language;

struct Canned {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const HINDI: &[Canned] = &[Canned { keywords: &["hello", "hi", "namaste"],
                                    answer: "नमस्ते! मैं आपका कृषि विशेषज्ञ हूँ। मुझसे फसल, मिट्टी, कीड़े, सिंचाई, खाद, या सब्सिडी के बारे में पूछिए। मैं 200 शब्दों में व्यावहारिक सलाह दूंगा।" },
                           Canned { keywords: &["crop", "fasal", "plant"],
                                    answer: "फसल चुनाव: मिट्टी के प्रकार, जलवायु, पानी और बाजार की मांग के अनुसार किस्म चुनें। नए किसानों के लिए: टमाटर, प्याज, आलू भरोसेमंद हैं। मिट्टी का pH 6.0-7.0 रखें, अच्छा निकास सुनिश्चित करें।" },
                           Canned { keywords: &["subsidy", "yojana", "scheme"],
                                    answer: "सरकारी सब्सिडी: पहले प्रशिक्षण मॉड्यूल पूरा करें। पात्रता जमीन के आकार पर निर्भर करती है। छोटे किसानों (≤2 एकड़) के लिए PM-KISAN, मध्यम खेतों (2-5 एकड़) के लिए RKVY। दस्तावेज तैयार रखें: आधार, जमीन के कागजात, बैंक विवरण।" },
                           Canned { keywords: &["water", "sinchayee", "irrigation"],
                                    answer: "सिंचाई की अच्छी प्रथाओं: 30% पानी की बचत के लिए ड्रिप सिंचाई का उपयोग करें। बढ़ते मौसम में 70-80% मिट्टी की नमी बनाए रखें। सुबह जल्दी या शाम को पानी दें। मिट्टी की नमी 2-3 इंच गहराई में जांचें। ज्यादा पानी न दें - जड़ सड़न होती है।" }];

const HINDI_GENERIC: &str = "मैं आपका कृषि विशेषज्ञ हूँ! मुझसे फसल की किस्में, मिट्टी तैयार करना, कीड़े नियंत्रण, सिंचाई, खाद, या सरकारी योजनाओं के बारे में पूछिए। मैं 200 शब्दों में व्यावहारिक सलाह दूंगा।";

const ODIA: &[Canned] = &[Canned { keywords: &["hello", "hi", "namaskar"],
                                   answer: "ନମସ୍କାର! ମୁଁ ଆପଣଙ୍କ କୃଷି ବିଶେଷଜ୍ଞ। ମୋତେ ଫସଲ, ମାଟି, କୀଟପତଙ୍ଗ, ସିଙ୍ଚନ, ଖାଦ୍ୟ, କିମ୍ବା ସବସିଡି ବିଷୟରେ ପ୍ରଶ୍ନ କରନ୍ତୁ। ମୁଁ 200 ଶବ୍ଦରେ ବ୍ୟବହାରିକ ସଲାହ ଦେବି।" },
                          Canned { keywords: &["crop", "fasal", "plant"],
                                   answer: "ଫସଲ ବାଛିବା: ଆପଣଙ୍କ ମାଟି ପ୍ରକାର, ଜଳବାୟୁ, ପାଣି ଭରଣା ଆର ବାଜାର ମାଗ ଅନୁସାରେ ପ୍ରଜାତି ଚୟନ କରନ୍ତୁ। ନୂଆ କୃଷକଙ୍କ ପାଇଁ: ଟମେଟୋ, ପିଆଜ, ଆଲୁ ଭରସାଯୋଗ୍ୟ। ମାଟି pH 6.0-7.0 ରାଖନ୍ତୁ, ଭାଲ ପାଣି ନିକାସ ସୁନିଶ୍ଚିତ କରନ୍ତୁ।" }];

const ODIA_GENERIC: &str = "ମୁଁ ଆପଣଙ୍କ କୃଷି ବିଶେଷଜ୍ଞ! ମୋତେ ଫସଲ ପ୍ରଜାତି, ମାଟି ତୈୟାରୀ, କୀଟପତଙ୍ଗ ନିୟନ୍ତ୍ରଣ, ସିଙ୍ଚନ ପଦ୍ଧତି, ଖାଦ୍ୟ ପ୍ରୟୋଗ, କିମ୍ବା ସରକାରୀ ଯୋଜନା ବିଷୟରେ ପ୍ରଶ୍ନ କରନ୍ତୁ। ମୁଁ 200 ଶବ୍ଦରେ ବ୍ୟବହାରିକ ସଲାହ ଦେବି।";

const ENGLISH: &[Canned] = &[Canned { keywords: &["hello", "hi"],
                                      answer: "Hello! I'm your Agricultural Expert. Ask me about crops, soil, pests, irrigation, fertilizers, or subsidies. I'll give you practical farming advice in under 200 words." },
                             Canned { keywords: &["crop", "plant"],
                                      answer: "Crop Selection Tips: Choose varieties based on your soil type, climate, and local market demand. For beginners: tomatoes, onions, potatoes are reliable. Check soil pH (6.0-7.0 ideal), ensure good drainage, and select disease-resistant varieties. Consider crop rotation to maintain soil health." }];

const ENGLISH_GENERIC: &str = "I'm your Agricultural Expert! Ask specific questions about: crop varieties, soil preparation, pest control, irrigation methods, fertilizer application, or government schemes. I'll provide practical, actionable advice under 200 words.";

/// Una palabra clave coincide si alguna palabra de la pregunta empieza por
/// ella ("plants" coincide con "plant"; "this" no coincide con "hi").
fn mentions(words: &[String], keyword: &str) -> bool {
    words.iter().any(|w| w.starts_with(keyword))
}

/// Respuesta local para `question` en `language`. Siempre devuelve texto.
pub fn fallback_response(question: &str, language: Language) -> &'static str {
    let words: Vec<String> = question.to_lowercase()
                                     .split(|c: char| !c.is_alphanumeric())
                                     .filter(|w| !w.is_empty())
                                     .map(str::to_string)
                                     .collect();
    let (table, generic) = match language {
        Language::Hi => (HINDI, HINDI_GENERIC),
        Language::Or => (ODIA, ODIA_GENERIC),
        Language::En => (ENGLISH, ENGLISH_GENERIC),
    };
    table.iter()
         .find(|c| c.keywords.iter().any(|k| mentions(&words, k)))
         .map(|c| c.answer)
         .unwrap_or(generic)
}
