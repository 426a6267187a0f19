//! Static surah and page tables for the Madina mushaf layout.

use super::{Revelation, SurahInfo};
use super::Revelation::{Meccan, Medinan};

const fn surah(
    number: u8,
    ayah_count: u16,
    start_ayah: u16,
    name_arabic: &'static str,
    name_transliterated: &'static str,
    name_english: &'static str,
    revelation: Revelation,
    revelation_order: u8,
    ruku_count: u8,
) -> SurahInfo {
    SurahInfo {
        number,
        ayah_count,
        start_ayah,
        name_arabic,
        name_transliterated,
        name_english,
        revelation,
        revelation_order,
        ruku_count,
    }
}

/// Surah records, index `n - 1` holds surah `n`.
pub(super) static SURAHS: [SurahInfo; 114] = [
    surah(1, 7, 0, "الفاتحة", "Al-Faatiha", "The Opening", Meccan, 5, 1),
    surah(2, 286, 7, "البقرة", "Al-Baqara", "The Cow", Medinan, 87, 40),
    surah(3, 200, 293, "آل عمران", "Aal-i-Imraan", "The Family of Imraan", Medinan, 89, 20),
    surah(4, 176, 493, "النساء", "An-Nisaa", "The Women", Medinan, 92, 24),
    surah(5, 120, 669, "المائدة", "Al-Maaida", "The Table", Medinan, 112, 16),
    surah(6, 165, 789, "الأنعام", "Al-An'aam", "The Cattle", Meccan, 55, 20),
    surah(7, 206, 954, "الأعراف", "Al-A'raaf", "The Heights", Meccan, 39, 24),
    surah(8, 75, 1160, "الأنفال", "Al-Anfaal", "The Spoils of War", Medinan, 88, 10),
    surah(9, 129, 1235, "التوبة", "At-Tawba", "The Repentance", Medinan, 113, 16),
    surah(10, 109, 1364, "يونس", "Yunus", "Jonas", Meccan, 51, 11),
    surah(11, 123, 1473, "هود", "Hud", "Hud", Meccan, 52, 10),
    surah(12, 111, 1596, "يوسف", "Yusuf", "Joseph", Meccan, 53, 12),
    surah(13, 43, 1707, "الرعد", "Ar-Ra'd", "The Thunder", Medinan, 96, 6),
    surah(14, 52, 1750, "ابراهيم", "Ibrahim", "Abraham", Meccan, 72, 7),
    surah(15, 99, 1802, "الحجر", "Al-Hijr", "The Rock", Meccan, 54, 6),
    surah(16, 128, 1901, "النحل", "An-Nahl", "The Bee", Meccan, 70, 16),
    surah(17, 111, 2029, "الإسراء", "Al-Israa", "The Night Journey", Meccan, 50, 12),
    surah(18, 110, 2140, "الكهف", "Al-Kahf", "The Cave", Meccan, 69, 12),
    surah(19, 98, 2250, "مريم", "Maryam", "Mary", Meccan, 44, 6),
    surah(20, 135, 2348, "طه", "Taa-Haa", "Taa-Haa", Meccan, 45, 8),
    surah(21, 112, 2483, "الأنبياء", "Al-Anbiyaa", "The Prophets", Meccan, 73, 7),
    surah(22, 78, 2595, "الحج", "Al-Hajj", "The Pilgrimage", Medinan, 103, 10),
    surah(23, 118, 2673, "المؤمنون", "Al-Muminoon", "The Believers", Meccan, 74, 6),
    surah(24, 64, 2791, "النور", "An-Noor", "The Light", Medinan, 102, 9),
    surah(25, 77, 2855, "الفرقان", "Al-Furqaan", "The Criterion", Meccan, 42, 6),
    surah(26, 227, 2932, "الشعراء", "Ash-Shu'araa", "The Poets", Meccan, 47, 11),
    surah(27, 93, 3159, "النمل", "An-Naml", "The Ant", Meccan, 48, 7),
    surah(28, 88, 3252, "القصص", "Al-Qasas", "The Stories", Meccan, 49, 8),
    surah(29, 69, 3340, "العنكبوت", "Al-Ankaboot", "The Spider", Meccan, 85, 7),
    surah(30, 60, 3409, "الروم", "Ar-Room", "The Romans", Meccan, 84, 6),
    surah(31, 34, 3469, "لقمان", "Luqman", "Luqman", Meccan, 57, 3),
    surah(32, 30, 3503, "السجدة", "As-Sajda", "The Prostration", Meccan, 75, 3),
    surah(33, 73, 3533, "الأحزاب", "Al-Ahzaab", "The Clans", Medinan, 90, 9),
    surah(34, 54, 3606, "سبإ", "Saba", "Sheba", Meccan, 58, 6),
    surah(35, 45, 3660, "فاطر", "Faatir", "The Originator", Meccan, 43, 5),
    surah(36, 83, 3705, "يس", "Yaseen", "Yaseen", Meccan, 41, 5),
    surah(37, 182, 3788, "الصافات", "As-Saaffaat", "Those drawn up in Ranks", Meccan, 56, 5),
    surah(38, 88, 3970, "ص", "Saad", "The letter Saad", Meccan, 38, 5),
    surah(39, 75, 4058, "الزمر", "Az-Zumar", "The Groups", Meccan, 59, 8),
    surah(40, 85, 4133, "غافر", "Al-Ghaafir", "The Forgiver", Meccan, 60, 9),
    surah(41, 54, 4218, "فصلت", "Fussilat", "Explained in detail", Meccan, 61, 6),
    surah(42, 53, 4272, "الشورى", "Ash-Shura", "Consultation", Meccan, 62, 5),
    surah(43, 89, 4325, "الزخرف", "Az-Zukhruf", "Ornaments of gold", Meccan, 63, 7),
    surah(44, 59, 4414, "الدخان", "Ad-Dukhaan", "The Smoke", Meccan, 64, 3),
    surah(45, 37, 4473, "الجاثية", "Al-Jaathiya", "Crouching", Meccan, 65, 4),
    surah(46, 35, 4510, "الأحقاف", "Al-Ahqaf", "The Dunes", Meccan, 66, 4),
    surah(47, 38, 4545, "محمد", "Muhammad", "Muhammad", Medinan, 95, 4),
    surah(48, 29, 4583, "الفتح", "Al-Fath", "The Victory", Medinan, 111, 4),
    surah(49, 18, 4612, "الحجرات", "Al-Hujuraat", "The Inner Apartments", Medinan, 106, 2),
    surah(50, 45, 4630, "ق", "Qaaf", "The letter Qaaf", Meccan, 34, 3),
    surah(51, 60, 4675, "الذاريات", "Adh-Dhaariyat", "The Winnowing Winds", Meccan, 67, 3),
    surah(52, 49, 4735, "الطور", "At-Tur", "The Mount", Meccan, 76, 2),
    surah(53, 62, 4784, "النجم", "An-Najm", "The Star", Meccan, 23, 3),
    surah(54, 55, 4846, "القمر", "Al-Qamar", "The Moon", Meccan, 37, 3),
    surah(55, 78, 4901, "الرحمن", "Ar-Rahmaan", "The Beneficent", Medinan, 97, 3),
    surah(56, 96, 4979, "الواقعة", "Al-Waaqia", "The Inevitable", Meccan, 46, 3),
    surah(57, 29, 5075, "الحديد", "Al-Hadid", "The Iron", Medinan, 94, 4),
    surah(58, 22, 5104, "المجادلة", "Al-Mujaadila", "The Pleading Woman", Medinan, 105, 3),
    surah(59, 24, 5126, "الحشر", "Al-Hashr", "The Exile", Medinan, 101, 3),
    surah(60, 13, 5150, "الممتحنة", "Al-Mumtahana", "She that is to be examined", Medinan, 91, 2),
    surah(61, 14, 5163, "الصف", "As-Saff", "The Ranks", Medinan, 109, 2),
    surah(62, 11, 5177, "الجمعة", "Al-Jumu'a", "Friday", Medinan, 110, 2),
    surah(63, 11, 5188, "المنافقون", "Al-Munaafiqoon", "The Hypocrites", Medinan, 104, 2),
    surah(64, 18, 5199, "التغابن", "At-Taghaabun", "Mutual Disillusion", Medinan, 108, 2),
    surah(65, 12, 5217, "الطلاق", "At-Talaaq", "Divorce", Medinan, 99, 2),
    surah(66, 12, 5229, "التحريم", "At-Tahrim", "The Prohibition", Medinan, 107, 2),
    surah(67, 30, 5241, "الملك", "Al-Mulk", "The Sovereignty", Meccan, 77, 2),
    surah(68, 52, 5271, "القلم", "Al-Qalam", "The Pen", Meccan, 2, 2),
    surah(69, 52, 5323, "الحاقة", "Al-Haaqqa", "The Reality", Meccan, 78, 2),
    surah(70, 44, 5375, "المعارج", "Al-Ma'aarij", "The Ascending Stairways", Meccan, 79, 2),
    surah(71, 28, 5419, "نوح", "Nooh", "Noah", Meccan, 71, 2),
    surah(72, 28, 5447, "الجن", "Al-Jinn", "The Jinn", Meccan, 40, 2),
    surah(73, 20, 5475, "المزمل", "Al-Muzzammil", "The Enshrouded One", Meccan, 3, 2),
    surah(74, 56, 5495, "المدثر", "Al-Muddaththir", "The Cloaked One", Meccan, 4, 2),
    surah(75, 40, 5551, "القيامة", "Al-Qiyaama", "The Resurrection", Meccan, 31, 2),
    surah(76, 31, 5591, "الانسان", "Al-Insaan", "Man", Medinan, 98, 2),
    surah(77, 50, 5622, "المرسلات", "Al-Mursalaat", "The Emissaries", Meccan, 33, 2),
    surah(78, 40, 5672, "النبإ", "An-Naba", "The Announcement", Meccan, 80, 2),
    surah(79, 46, 5712, "النازعات", "An-Naazi'aat", "Those who drag forth", Meccan, 81, 2),
    surah(80, 42, 5758, "عبس", "Abasa", "He frowned", Meccan, 24, 1),
    surah(81, 29, 5800, "التكوير", "At-Takwir", "The Overthrowing", Meccan, 7, 1),
    surah(82, 19, 5829, "الإنفطار", "Al-Infitaar", "The Cleaving", Meccan, 82, 1),
    surah(83, 36, 5848, "المطففين", "Al-Mutaffifin", "Defrauding", Meccan, 86, 1),
    surah(84, 25, 5884, "الإنشقاق", "Al-Inshiqaaq", "The Splitting Open", Meccan, 83, 1),
    surah(85, 22, 5909, "البروج", "Al-Burooj", "The Constellations", Meccan, 27, 1),
    surah(86, 17, 5931, "الطارق", "At-Taariq", "The Morning Star", Meccan, 36, 1),
    surah(87, 19, 5948, "الأعلى", "Al-A'laa", "The Most High", Meccan, 8, 1),
    surah(88, 26, 5967, "الغاشية", "Al-Ghaashiya", "The Overwhelming", Meccan, 68, 1),
    surah(89, 30, 5993, "الفجر", "Al-Fajr", "The Dawn", Meccan, 10, 1),
    surah(90, 20, 6023, "البلد", "Al-Balad", "The City", Meccan, 35, 1),
    surah(91, 15, 6043, "الشمس", "Ash-Shams", "The Sun", Meccan, 26, 1),
    surah(92, 21, 6058, "الليل", "Al-Lail", "The Night", Meccan, 9, 1),
    surah(93, 11, 6079, "الضحى", "Ad-Dhuhaa", "The Morning Hours", Meccan, 11, 1),
    surah(94, 8, 6090, "الشرح", "Ash-Sharh", "The Consolation", Meccan, 12, 1),
    surah(95, 8, 6098, "التين", "At-Tin", "The Fig", Meccan, 28, 1),
    surah(96, 19, 6106, "العلق", "Al-Alaq", "The Clot", Meccan, 1, 1),
    surah(97, 5, 6125, "القدر", "Al-Qadr", "The Power, Fate", Meccan, 25, 1),
    surah(98, 8, 6130, "البينة", "Al-Bayyina", "The Evidence", Medinan, 100, 1),
    surah(99, 8, 6138, "الزلزلة", "Az-Zalzala", "The Earthquake", Medinan, 93, 1),
    surah(100, 11, 6146, "العاديات", "Al-Aadiyaat", "The Chargers", Meccan, 14, 1),
    surah(101, 11, 6157, "القارعة", "Al-Qaari'a", "The Calamity", Meccan, 30, 1),
    surah(102, 8, 6168, "التكاثر", "At-Takaathur", "Competition", Meccan, 16, 1),
    surah(103, 3, 6176, "العصر", "Al-Asr", "The Declining Day, Epoch", Meccan, 13, 1),
    surah(104, 9, 6179, "الهمزة", "Al-Humaza", "The Traducer", Meccan, 32, 1),
    surah(105, 5, 6188, "الفيل", "Al-Fil", "The Elephant", Meccan, 19, 1),
    surah(106, 4, 6193, "قريش", "Quraish", "Quraysh", Meccan, 29, 1),
    surah(107, 7, 6197, "الماعون", "Al-Maa'un", "Almsgiving", Meccan, 17, 1),
    surah(108, 3, 6204, "الكوثر", "Al-Kawthar", "Abundance", Meccan, 15, 1),
    surah(109, 6, 6207, "الكافرون", "Al-Kaafiroon", "The Disbelievers", Meccan, 18, 1),
    surah(110, 3, 6213, "النصر", "An-Nasr", "Divine Support", Medinan, 114, 1),
    surah(111, 5, 6216, "المسد", "Al-Masad", "The Palm Fibre", Meccan, 6, 1),
    surah(112, 4, 6221, "الإخلاص", "Al-Ikhlaas", "Sincerity", Meccan, 22, 1),
    surah(113, 5, 6225, "الفلق", "Al-Falaq", "The Dawn", Meccan, 20, 1),
    surah(114, 6, 6230, "الناس", "An-Naas", "Mankind", Meccan, 21, 1),
];

/// First `(surah, ayah)` printed on each page, indexed by page.
pub(super) static PAGE_STARTS: [(u8, u16); 604] = [
    (1, 1), (2, 1), (2, 6), (2, 17), (2, 25), (2, 30), (2, 38), (2, 49),
    (2, 58), (2, 62), (2, 70), (2, 77), (2, 84), (2, 89), (2, 94), (2, 102),
    (2, 106), (2, 113), (2, 120), (2, 127), (2, 135), (2, 142), (2, 146), (2, 154),
    (2, 164), (2, 170), (2, 177), (2, 182), (2, 187), (2, 191), (2, 197), (2, 203),
    (2, 211), (2, 216), (2, 220), (2, 225), (2, 231), (2, 234), (2, 238), (2, 246),
    (2, 249), (2, 253), (2, 257), (2, 260), (2, 265), (2, 270), (2, 275), (2, 282),
    (2, 283), (3, 1), (3, 10), (3, 16), (3, 23), (3, 30), (3, 38), (3, 46),
    (3, 53), (3, 62), (3, 71), (3, 78), (3, 84), (3, 92), (3, 101), (3, 109),
    (3, 116), (3, 122), (3, 133), (3, 141), (3, 149), (3, 154), (3, 158), (3, 166),
    (3, 174), (3, 181), (3, 187), (3, 195), (4, 1), (4, 7), (4, 12), (4, 15),
    (4, 20), (4, 24), (4, 27), (4, 34), (4, 38), (4, 45), (4, 52), (4, 60),
    (4, 66), (4, 75), (4, 80), (4, 87), (4, 92), (4, 95), (4, 102), (4, 106),
    (4, 114), (4, 122), (4, 128), (4, 135), (4, 141), (4, 148), (4, 155), (4, 163),
    (4, 171), (4, 176), (5, 3), (5, 6), (5, 10), (5, 14), (5, 18), (5, 24),
    (5, 32), (5, 37), (5, 42), (5, 46), (5, 51), (5, 58), (5, 65), (5, 71),
    (5, 77), (5, 83), (5, 90), (5, 96), (5, 104), (5, 109), (5, 114), (6, 1),
    (6, 9), (6, 19), (6, 28), (6, 36), (6, 45), (6, 53), (6, 60), (6, 69),
    (6, 74), (6, 82), (6, 91), (6, 95), (6, 102), (6, 111), (6, 119), (6, 125),
    (6, 132), (6, 138), (6, 143), (6, 147), (6, 152), (6, 158), (7, 1), (7, 12),
    (7, 23), (7, 31), (7, 38), (7, 44), (7, 52), (7, 58), (7, 68), (7, 74),
    (7, 82), (7, 88), (7, 96), (7, 105), (7, 121), (7, 131), (7, 138), (7, 144),
    (7, 150), (7, 156), (7, 160), (7, 164), (7, 171), (7, 179), (7, 188), (7, 196),
    (8, 1), (8, 9), (8, 17), (8, 26), (8, 34), (8, 41), (8, 46), (8, 53),
    (8, 62), (8, 70), (9, 1), (9, 7), (9, 14), (9, 21), (9, 27), (9, 32),
    (9, 37), (9, 41), (9, 48), (9, 55), (9, 62), (9, 69), (9, 73), (9, 80),
    (9, 87), (9, 94), (9, 100), (9, 107), (9, 112), (9, 118), (9, 123), (10, 1),
    (10, 7), (10, 15), (10, 21), (10, 26), (10, 34), (10, 43), (10, 54), (10, 62),
    (10, 71), (10, 79), (10, 89), (10, 98), (10, 107), (11, 6), (11, 13), (11, 20),
    (11, 29), (11, 38), (11, 46), (11, 54), (11, 63), (11, 72), (11, 82), (11, 89),
    (11, 98), (11, 109), (11, 118), (12, 5), (12, 15), (12, 23), (12, 31), (12, 38),
    (12, 44), (12, 53), (12, 64), (12, 70), (12, 79), (12, 87), (12, 96), (12, 104),
    (13, 1), (13, 6), (13, 14), (13, 19), (13, 29), (13, 35), (13, 43), (14, 6),
    (14, 11), (14, 19), (14, 25), (14, 34), (14, 43), (15, 1), (15, 16), (15, 32),
    (15, 52), (15, 71), (15, 91), (16, 7), (16, 15), (16, 27), (16, 35), (16, 43),
    (16, 55), (16, 65), (16, 73), (16, 80), (16, 88), (16, 94), (16, 103), (16, 111),
    (16, 119), (17, 1), (17, 8), (17, 18), (17, 28), (17, 39), (17, 50), (17, 59),
    (17, 67), (17, 76), (17, 87), (17, 97), (17, 105), (18, 5), (18, 16), (18, 21),
    (18, 28), (18, 35), (18, 46), (18, 54), (18, 62), (18, 75), (18, 84), (18, 98),
    (19, 1), (19, 12), (19, 26), (19, 39), (19, 52), (19, 65), (19, 77), (19, 96),
    (20, 13), (20, 38), (20, 52), (20, 65), (20, 77), (20, 88), (20, 99), (20, 114),
    (20, 126), (21, 1), (21, 11), (21, 25), (21, 36), (21, 45), (21, 58), (21, 73),
    (21, 82), (21, 91), (21, 102), (22, 1), (22, 6), (22, 16), (22, 24), (22, 31),
    (22, 39), (22, 47), (22, 56), (22, 65), (22, 73), (23, 1), (23, 18), (23, 28),
    (23, 43), (23, 60), (23, 75), (23, 90), (23, 105), (24, 1), (24, 11), (24, 21),
    (24, 28), (24, 32), (24, 37), (24, 44), (24, 54), (24, 59), (24, 62), (25, 3),
    (25, 12), (25, 21), (25, 33), (25, 44), (25, 56), (25, 68), (26, 1), (26, 20),
    (26, 40), (26, 61), (26, 84), (26, 112), (26, 137), (26, 160), (26, 184), (26, 207),
    (27, 1), (27, 14), (27, 23), (27, 36), (27, 45), (27, 56), (27, 64), (27, 77),
    (27, 89), (28, 6), (28, 14), (28, 22), (28, 29), (28, 36), (28, 44), (28, 51),
    (28, 60), (28, 71), (28, 78), (28, 85), (29, 7), (29, 15), (29, 24), (29, 31),
    (29, 39), (29, 46), (29, 53), (29, 64), (30, 6), (30, 16), (30, 25), (30, 33),
    (30, 42), (30, 51), (31, 1), (31, 12), (31, 20), (31, 29), (32, 1), (32, 12),
    (32, 21), (33, 1), (33, 7), (33, 16), (33, 23), (33, 31), (33, 36), (33, 44),
    (33, 51), (33, 55), (33, 63), (34, 1), (34, 8), (34, 15), (34, 23), (34, 32),
    (34, 40), (34, 49), (35, 4), (35, 12), (35, 19), (35, 31), (35, 39), (35, 45),
    (36, 13), (36, 28), (36, 41), (36, 55), (36, 71), (37, 1), (37, 25), (37, 52),
    (37, 77), (37, 103), (37, 127), (37, 154), (38, 1), (38, 17), (38, 27), (38, 43),
    (38, 62), (38, 84), (39, 6), (39, 11), (39, 22), (39, 32), (39, 41), (39, 48),
    (39, 57), (39, 68), (39, 75), (40, 8), (40, 17), (40, 26), (40, 34), (40, 41),
    (40, 50), (40, 59), (40, 67), (40, 78), (41, 1), (41, 12), (41, 21), (41, 30),
    (41, 39), (41, 47), (42, 1), (42, 11), (42, 16), (42, 23), (42, 32), (42, 45),
    (42, 52), (43, 11), (43, 23), (43, 34), (43, 48), (43, 61), (43, 74), (44, 1),
    (44, 19), (44, 40), (45, 1), (45, 14), (45, 23), (45, 33), (46, 6), (46, 15),
    (46, 21), (46, 29), (47, 1), (47, 12), (47, 20), (47, 30), (48, 1), (48, 10),
    (48, 16), (48, 24), (48, 29), (49, 5), (49, 12), (50, 1), (50, 16), (50, 36),
    (51, 7), (51, 31), (51, 52), (52, 15), (52, 32), (53, 1), (53, 27), (53, 45),
    (54, 7), (54, 28), (54, 50), (55, 17), (55, 41), (55, 68), (56, 17), (56, 51),
    (56, 77), (57, 4), (57, 12), (57, 19), (57, 25), (58, 1), (58, 7), (58, 12),
    (58, 22), (59, 4), (59, 10), (59, 17), (60, 1), (60, 6), (60, 12), (61, 6),
    (62, 1), (62, 9), (63, 5), (64, 1), (64, 10), (65, 1), (65, 6), (66, 1),
    (66, 8), (67, 1), (67, 13), (67, 27), (68, 16), (68, 43), (69, 9), (69, 35),
    (70, 11), (70, 40), (71, 11), (72, 1), (72, 14), (73, 1), (73, 20), (74, 18),
    (74, 48), (75, 20), (76, 6), (76, 26), (77, 20), (78, 1), (78, 31), (79, 16),
    (80, 1), (81, 1), (82, 1), (83, 7), (83, 35), (85, 1), (86, 1), (87, 16),
    (89, 1), (89, 24), (91, 1), (92, 15), (95, 1), (97, 1), (98, 8), (100, 10),
    (103, 1), (106, 1), (109, 1), (112, 1),
];
