// Site sections and the tag each one filters on

/// Route path to section tag, in menu order
pub const NAVIGATION_TAGS: &[(&str, &str)] = &[
    ("/acuicultura", "Acuicultura"),
    ("/acuicultura/salmonicultura", "Acuicultura / Salmonicultura"),
    ("/acuicultura/mitilicultura", "Acuicultura / Mitilicultura"),
    ("/lecheria", "Lechería"),
    ("/turismo", "Turismo"),
    ("/turismo/operadores", "Turismo / Operadores turísticos"),
    ("/turismo/hoteleria-gastronomia", "Turismo / Hotelería y gastronomía"),
    ("/turismo/oferta", "Turismo / Oferta turística"),
    ("/economia-desarrollo", "Economía y desarrollo"),
    ("/economia-desarrollo/id", "Economía y desarrollo / I+D"),
    ("/economia-desarrollo/tecnologia", "Economía y desarrollo / Tecnología"),
    ("/economia-desarrollo/servicios", "Economía y desarrollo / Servicios"),
    ("/economia-desarrollo/marka-e", "Economía y desarrollo / Marka-E"),
    ("/pymes", "PyME's"),
];

pub fn tag_for_path(path: &str) -> Option<&'static str> {
    let path = path.trim();
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    NAVIGATION_TAGS
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, tag)| *tag)
}

pub fn path_for_tag(tag: &str) -> Option<&'static str> {
    let tag = tag.trim();
    NAVIGATION_TAGS
        .iter()
        .find(|(_, section_tag)| *section_tag == tag)
        .map(|(route, _)| *route)
}

pub fn all_tags() -> Vec<&'static str> {
    NAVIGATION_TAGS.iter().map(|(_, tag)| *tag).collect()
}

pub fn is_navigation_tag(tag: &str) -> bool {
    path_for_tag(tag).is_some()
}
