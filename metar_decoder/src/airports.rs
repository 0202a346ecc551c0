use indexmap::IndexMap;

pub const UNKNOWN_AIRPORT: &str = "Aeropuerto no identificado";

const SPANISH_AIRPORTS: &[(&str, &str)] = &[
    ("LEMD", "Aeropuerto Adolfo Suárez Madrid-Barajas"),
    ("LEBL", "Aeropuerto Josep Tarradellas Barcelona-El Prat"),
    ("LEPA", "Aeropuerto de Palma de Mallorca"),
    ("LEMG", "Aeropuerto de Málaga-Costa del Sol"),
    ("LEAL", "Aeropuerto de Alicante-Elche Miguel Hernández"),
    ("LEVC", "Aeropuerto de Valencia"),
    ("LEZL", "Aeropuerto de Sevilla"),
    ("LEBB", "Aeropuerto de Bilbao"),
    ("LEST", "Aeropuerto de Santiago-Rosalía de Castro"),
    ("LEVX", "Aeropuerto de Vigo"),
    ("LECO", "Aeropuerto de A Coruña"),
    ("LEAS", "Aeropuerto de Asturias"),
    ("LEXJ", "Aeropuerto Seve Ballesteros-Santander"),
    ("LESO", "Aeropuerto de San Sebastián"),
    ("LEVT", "Aeropuerto de Vitoria"),
    ("LEPP", "Aeropuerto de Pamplona"),
    ("LELO", "Aeropuerto de Logroño-Agoncillo"),
    ("LEZG", "Aeropuerto de Zaragoza"),
    ("LEHC", "Aeropuerto de Huesca-Pirineos"),
    ("LEDA", "Aeropuerto de Lleida-Alguaire"),
    ("LERS", "Aeropuerto de Reus"),
    ("LEGE", "Aeropuerto de Girona-Costa Brava"),
    ("LECH", "Aeropuerto de Castellón"),
    ("LEIB", "Aeropuerto de Ibiza"),
    ("LEMH", "Aeropuerto de Menorca"),
    ("LEMI", "Aeropuerto Internacional de la Región de Murcia"),
    ("LEAM", "Aeropuerto de Almería"),
    ("LEGR", "Aeropuerto Federico García Lorca Granada-Jaén"),
    ("LEJR", "Aeropuerto de Jerez"),
    ("LEBA", "Aeropuerto de Córdoba"),
    ("LEBZ", "Aeropuerto de Badajoz"),
    ("LESA", "Aeropuerto de Salamanca"),
    ("LEVD", "Aeropuerto de Valladolid"),
    ("LELN", "Aeropuerto de León"),
    ("LEBG", "Aeropuerto de Burgos"),
    ("LERL", "Aeropuerto de Ciudad Real"),
    ("LEAB", "Aeropuerto de Albacete"),
    ("LETL", "Aeropuerto de Teruel"),
    ("LECU", "Aeropuerto de Madrid-Cuatro Vientos"),
    ("LETO", "Base Aérea de Torrejón"),
    ("LEGT", "Base Aérea de Getafe"),
    ("LEMO", "Base Aérea de Morón"),
    ("LERT", "Base Naval de Rota"),
    ("LEZA", "Base Aérea de Zaragoza"),
    ("GCLP", "Aeropuerto de Gran Canaria"),
    ("GCTS", "Aeropuerto de Tenerife Sur"),
    ("GCXO", "Aeropuerto de Tenerife Norte-Ciudad de La Laguna"),
    ("GCRR", "Aeropuerto César Manrique-Lanzarote"),
    ("GCFV", "Aeropuerto de Fuerteventura"),
    ("GCLA", "Aeropuerto de La Palma"),
    ("GCGM", "Aeropuerto de La Gomera"),
    ("GCHI", "Aeropuerto de El Hierro"),
    ("GEML", "Aeropuerto de Melilla"),
];

/// Station code to display name. Built once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirportRegistry {
    airports: IndexMap<String, String>,
}

impl AirportRegistry {
    /// The built-in table of Spanish aerodromes.
    pub fn spanish() -> Self {
        SPANISH_AIRPORTS
            .iter()
            .map(|&(icao, name)| (icao.to_string(), name.to_string()))
            .collect()
    }

    /// Adds or replaces entries. Codes are stored upper case.
    pub fn extend<I, K, V>(&mut self, airports: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.airports.extend(
            airports
                .into_iter()
                .map(|(icao, name)| (icao.as_ref().to_uppercase(), name.into())),
        );
    }

    pub fn get(&self, icao: &str) -> Option<&str> {
        self.airports.get(icao).map(String::as_str)
    }

    pub fn display_name(&self, icao: &str) -> &str {
        self.get(icao).unwrap_or(UNKNOWN_AIRPORT)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AirportRegistry {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut registry = Self::default();
        registry.extend(iter);
        registry
    }
}
