//! Analysis prompt construction
//!
//! Builds the Danish-language instruction block sent to the provider, with
//! the tracked entities rendered as a bullet list. The same prompt is used
//! for file-based and inline-text requests; the text variant appends the
//! document between delimiters.

/// Builds analysis prompts for a fixed set of tracked entities.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    entities: Vec<String>,
}

impl PromptBuilder {
    /// Create a builder for the given entities. Order is preserved in the
    /// rendered bullet list.
    pub fn new(entities: Vec<String>) -> Self {
        Self { entities }
    }

    /// The entities this builder renders.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Prompt for a request where the document travels alongside the prompt
    /// (for example as an attached file URL).
    pub fn build(&self) -> String {
        let mut prompt = String::from(
            "Du er advokat med speciale i konkursboer, d\u{f8}dsboer og tvangsauktioner. \
             Analyser den vedlagte kundg\u{f8}relse fra Statstidende og find alle oplysninger \
             om f\u{f8}lgende punkter:\n\n",
        );

        for entity in &self.entities {
            prompt.push_str("- ");
            prompt.push_str(entity);
            prompt.push('\n');
        }

        prompt.push_str(
            "\nFor hvert punkt, angiv alle relevante oplysninger fra kundg\u{f8}relsen:\n\
             - Ved konkurs: skifteret, sagsnummer, frister og kurator\n\
             - Ved d\u{f8}dsbo: afd\u{f8}des navn, cpr-nummer, d\u{f8}dsdato, adresse og bobehandling\n\
             - Ved tvangsauktion: ejendommens adresse, auktionstidspunkt og rekvirent\n\n\
             Betragt hvert af punkterne isoleret og angiv kun oplysninger, der direkte \
             vedr\u{f8}rer punktet. Hvis der ikke findes oplysninger om et punkt, skriv \
             pr\u{e6}cis \"No information found.\" for det punkt. Svar p\u{e5} formen \
             \"<punkt>: <oplysninger>\" med en tom linje mellem hvert punkt.",
        );

        prompt
    }

    /// Prompt with the document text inlined after the instructions.
    pub fn build_with_text(&self, text: &str) -> String {
        let mut prompt = self.build();
        prompt.push_str("\n\nTekst til analyse:\n---\n");
        prompt.push_str(text);
        prompt.push_str("\n---");
        prompt
    }
}
