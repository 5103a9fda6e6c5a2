//! crates/juma_core/src/reference.rs
//!
//! Read-only reference data: the surah index and a small verse table.

use crate::domain::SurahNumber;

/// One entry of the surah index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surah {
    pub number: SurahNumber,
    pub name: &'static str,
    pub transliteration: &'static str,
    pub verse_count: u16,
}

/// One verse of the bundled verse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verse {
    pub surah: SurahNumber,
    pub verse: u16,
    pub page: u32,
    pub text: &'static str,
}

const fn surah(
    number: SurahNumber,
    name: &'static str,
    transliteration: &'static str,
    verse_count: u16,
) -> Surah {
    Surah {
        number,
        name,
        transliteration,
        verse_count,
    }
}

const fn verse(surah: SurahNumber, verse: u16, page: u32, text: &'static str) -> Verse {
    Verse {
        surah,
        verse,
        page,
        text,
    }
}

/// All 114 surahs, ordered by number.
static SURAHS: [Surah; 114] = [
    surah(1, "الفاتحة", "Al-Fatihah", 7),
    surah(2, "البقرة", "Al-Baqarah", 286),
    surah(3, "آل عمران", "Ali 'Imran", 200),
    surah(4, "النساء", "An-Nisa", 176),
    surah(5, "المائدة", "Al-Ma'idah", 120),
    surah(6, "الأنعام", "Al-An'am", 165),
    surah(7, "الأعراف", "Al-A'raf", 206),
    surah(8, "الأنفال", "Al-Anfal", 75),
    surah(9, "التوبة", "At-Tawbah", 129),
    surah(10, "يونس", "Yunus", 109),
    surah(11, "هود", "Hud", 123),
    surah(12, "يوسف", "Yusuf", 111),
    surah(13, "الرعد", "Ar-Ra'd", 43),
    surah(14, "إبراهيم", "Ibrahim", 52),
    surah(15, "الحجر", "Al-Hijr", 99),
    surah(16, "النحل", "An-Nahl", 128),
    surah(17, "الإسراء", "Al-Isra", 111),
    surah(18, "الكهف", "Al-Kahf", 110),
    surah(19, "مريم", "Maryam", 98),
    surah(20, "طه", "Taha", 135),
    surah(21, "الأنبياء", "Al-Anbya", 112),
    surah(22, "الحج", "Al-Hajj", 78),
    surah(23, "المؤمنون", "Al-Mu'minun", 118),
    surah(24, "النور", "An-Nur", 64),
    surah(25, "الفرقان", "Al-Furqan", 77),
    surah(26, "الشعراء", "Ash-Shu'ara", 227),
    surah(27, "النمل", "An-Naml", 93),
    surah(28, "القصص", "Al-Qasas", 88),
    surah(29, "العنكبوت", "Al-'Ankabut", 69),
    surah(30, "الروم", "Ar-Rum", 60),
    surah(31, "لقمان", "Luqman", 34),
    surah(32, "السجدة", "As-Sajdah", 30),
    surah(33, "الأحزاب", "Al-Ahzab", 73),
    surah(34, "سبأ", "Saba", 54),
    surah(35, "فاطر", "Fatir", 45),
    surah(36, "يس", "Ya-Sin", 83),
    surah(37, "الصافات", "As-Saffat", 182),
    surah(38, "ص", "Sad", 88),
    surah(39, "الزمر", "Az-Zumar", 75),
    surah(40, "غافر", "Ghafir", 85),
    surah(41, "فصلت", "Fussilat", 54),
    surah(42, "الشورى", "Ash-Shuraa", 53),
    surah(43, "الزخرف", "Az-Zukhruf", 89),
    surah(44, "الدخان", "Ad-Dukhan", 59),
    surah(45, "الجاثية", "Al-Jathiyah", 37),
    surah(46, "الأحقاف", "Al-Ahqaf", 35),
    surah(47, "محمد", "Muhammad", 38),
    surah(48, "الفتح", "Al-Fath", 29),
    surah(49, "الحجرات", "Al-Hujurat", 18),
    surah(50, "ق", "Qaf", 45),
    surah(51, "الذاريات", "Adh-Dhariyat", 60),
    surah(52, "الطور", "At-Tur", 49),
    surah(53, "النجم", "An-Najm", 62),
    surah(54, "القمر", "Al-Qamar", 55),
    surah(55, "الرحمن", "Ar-Rahman", 78),
    surah(56, "الواقعة", "Al-Waqi'ah", 96),
    surah(57, "الحديد", "Al-Hadid", 29),
    surah(58, "المجادلة", "Al-Mujadila", 22),
    surah(59, "الحشر", "Al-Hashr", 24),
    surah(60, "الممتحنة", "Al-Mumtahanah", 13),
    surah(61, "الصف", "As-Saf", 14),
    surah(62, "الجمعة", "Al-Jumu'ah", 11),
    surah(63, "المنافقون", "Al-Munafiqun", 11),
    surah(64, "التغابن", "At-Taghabun", 18),
    surah(65, "الطلاق", "At-Talaq", 12),
    surah(66, "التحريم", "At-Tahrim", 12),
    surah(67, "الملك", "Al-Mulk", 30),
    surah(68, "القلم", "Al-Qalam", 52),
    surah(69, "الحاقة", "Al-Haqqah", 52),
    surah(70, "المعارج", "Al-Ma'arij", 44),
    surah(71, "نوح", "Nuh", 28),
    surah(72, "الجن", "Al-Jinn", 28),
    surah(73, "المزمل", "Al-Muzzammil", 20),
    surah(74, "المدثر", "Al-Muddaththir", 56),
    surah(75, "القيامة", "Al-Qiyamah", 40),
    surah(76, "الإنسان", "Al-Insan", 31),
    surah(77, "المرسلات", "Al-Mursalat", 50),
    surah(78, "النبأ", "An-Naba", 40),
    surah(79, "النازعات", "An-Nazi'at", 46),
    surah(80, "عبس", "'Abasa", 42),
    surah(81, "التكوير", "At-Takwir", 29),
    surah(82, "الانفطار", "Al-Infitar", 19),
    surah(83, "المطففين", "Al-Mutaffifin", 36),
    surah(84, "الانشقاق", "Al-Inshiqaq", 25),
    surah(85, "البروج", "Al-Buruj", 22),
    surah(86, "الطارق", "At-Tariq", 17),
    surah(87, "الأعلى", "Al-A'la", 19),
    surah(88, "الغاشية", "Al-Ghashiyah", 26),
    surah(89, "الفجر", "Al-Fajr", 30),
    surah(90, "البلد", "Al-Balad", 20),
    surah(91, "الشمس", "Ash-Shams", 15),
    surah(92, "الليل", "Al-Layl", 21),
    surah(93, "الضحى", "Ad-Duhaa", 11),
    surah(94, "الشرح", "Ash-Sharh", 8),
    surah(95, "التين", "At-Tin", 8),
    surah(96, "العلق", "Al-'Alaq", 19),
    surah(97, "القدر", "Al-Qadr", 5),
    surah(98, "البينة", "Al-Bayyinah", 8),
    surah(99, "الزلزلة", "Az-Zalzalah", 8),
    surah(100, "العاديات", "Al-'Adiyat", 11),
    surah(101, "القارعة", "Al-Qari'ah", 11),
    surah(102, "التكاثر", "At-Takathur", 8),
    surah(103, "العصر", "Al-'Asr", 3),
    surah(104, "الهمزة", "Al-Humazah", 9),
    surah(105, "الفيل", "Al-Fil", 5),
    surah(106, "قريش", "Quraysh", 4),
    surah(107, "الماعون", "Al-Ma'un", 7),
    surah(108, "الكوثر", "Al-Kawthar", 3),
    surah(109, "الكافرون", "Al-Kafirun", 6),
    surah(110, "النصر", "An-Nasr", 3),
    surah(111, "المسد", "Al-Masad", 5),
    surah(112, "الإخلاص", "Al-Ikhlas", 4),
    surah(113, "الفلق", "Al-Falaq", 5),
    surah(114, "الناس", "An-Nas", 6),
];

static VERSES: [Verse; 14] = [
    verse(1, 1, 1, "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ"),
    verse(1, 2, 1, "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ"),
    verse(1, 3, 1, "الرَّحْمَٰنِ الرَّحِيمِ"),
    verse(1, 4, 1, "مَالِكِ يَوْمِ الدِّينِ"),
    verse(1, 5, 1, "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ"),
    verse(1, 6, 1, "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ"),
    verse(1, 7, 1, "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ"),
    verse(2, 1, 2, "الم"),
    verse(2, 2, 2, "ذَٰلِكَ الْكِتَابُ لَا رَيْبَ ۛ فِيهِ ۛ هُدًى لِّلْمُتَّقِينَ"),
    verse(2, 3, 2, "الَّذِينَ يُؤْمِنُونَ بِالْغَيْبِ وَيُقِيمُونَ الصَّلَاةَ وَمِمَّا رَزَقْنَاهُمْ يُنفِقُونَ"),
    verse(2, 4, 2, "وَالَّذِينَ يُؤْمِنُونَ بِمَا أُنزِلَ إِلَيْكَ وَمَا أُنزِلَ مِن قَبْلِكَ وَبِالْآخِرَةِ هُمْ يُوقِنُونَ"),
    verse(2, 5, 2, "أُولَٰئِكَ عَلَىٰ هُدًى مِّن رَّبِّهِمْ ۖ وَأُولَٰئِكَ هُمُ الْمُفْلِحُونَ"),
    verse(2, 6, 3, "إِنَّ الَّذِينَ كَفَرُوا سَوَاءٌ عَلَيْهِمْ أَأَنذَرْتَهُمْ أَمْ لَمْ تُنذِرْهُمْ لَا يُؤْمِنُونَ"),
    verse(2, 7, 3, "خَتَمَ اللَّهُ عَلَىٰ قُلُوبِهِمْ وَعَلَىٰ سَمْعِهِمْ ۖ وَعَلَىٰ أَبْصَارِهِمْ غِشَاوَةٌ ۖ وَلَهُمْ عَذَابٌ عَظِيمٌ"),
];

pub fn all_surahs() -> &'static [Surah] {
    &SURAHS
}

/// Looks up a surah by number.
pub fn surah_by_number(number: SurahNumber) -> Option<&'static Surah> {
    let index = usize::from(number).checked_sub(1)?;
    SURAHS.get(index)
}

/// The Arabic display name of a surah, or `""` for an unknown number.
pub fn surah_name(number: SurahNumber) -> &'static str {
    surah_by_number(number).map_or("", |s| s.name)
}

/// The bundled verses of a surah, in verse order. Empty when the table
/// carries none for it.
pub fn verses_of(surah: SurahNumber) -> impl Iterator<Item = &'static Verse> {
    VERSES.iter().filter(move |v| v.surah == surah)
}

/// The mushaf page a verse sits on, if the verse is in the bundled table.
pub fn page_of(surah: SurahNumber, verse: u16) -> Option<u32> {
    VERSES
        .iter()
        .find(|v| v.surah == surah && v.verse == verse)
        .map(|v| v.page)
}
