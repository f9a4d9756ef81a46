// src/hal/simulation/ecg_spectrum.rs
//! Stored harmonics of the ECG model
//!
//! One row per lead in channel order C1..C6, R, L, F. Each row holds the
//! first 32 bins of a one-sided DFT of one heart period (800 samples at
//! 1000 Hz); bins above DC are already doubled, so the real part of the
//! inverse transform over 800 samples restores the period.

use crate::config::constants::{ecg::HARMONIC_COUNT, module::ECG_CHANNEL_COUNT};

/// Complex harmonics `(re, im)` per lead, channels 0..9 = C1..C6, R, L, F
pub const ECG_HARMONICS: [[(f64, f64); HARMONIC_COUNT]; ECG_CHANNEL_COUNT as usize] = [
    [
        (425886.1704, 0.0000),
        (-659933.2986, 339086.6054),
        (723733.9979, -768159.9309),
        (-775063.9482, 388431.9524),
        (12071.8021, -25276.9339),
        (404953.0305, 450951.8416),
        (-5618.7883, -543353.8958),
        (-173337.9504, 124983.9111),
        (57226.1811, 110983.2708),
        (93452.5026, -187428.3282),
        (-273559.2003, 24919.8606),
        (106046.1799, 276639.8314),
        (259687.0904, -160653.6242),
        (-211778.3645, -211805.5453),
        (-135354.8119, 246305.1860),
        (259222.0993, 46692.2305),
        (-42322.6466, -249470.5054),
        (-216627.6654, 121541.9878),
        (182576.1477, 163565.1790),
        (96255.2648, -220006.1050),
        (-231534.9823, -22658.7054),
        (48550.6158, 217929.4030),
        (182746.5021, -109348.5681),
        (-153512.8529, -131759.3162),
        (-72126.3644, 177380.1739),
        (180141.8182, 11407.4757),
        (-43428.6752, -163690.9039),
        (-132097.8779, 86851.3050),
        (115344.5059, 90834.2770),
        (45886.9615, -127645.6491),
        (-124640.3869, -2905.1896),
        (33498.0760, 108967.4328),
    ],
    [
        (638327.9299, 0.0000),
        (-875421.4387, 188995.9380),
        (688819.7019, -806922.6831),
        (-763364.4457, 623549.5702),
        (103099.3214, -251080.7005),
        (257764.6648, 531778.2663),
        (45230.4978, -431194.6579),
        (-4661.3949, 33179.2380),
        (-106619.5919, -26272.4066),
        (13237.2979, -11822.7229),
        (-97087.1136, 60561.4311),
        (85916.6425, 103919.3548),
        (109293.3401, -83535.3182),
        (-88861.5505, -97273.1788),
        (-65751.6912, 91935.9137),
        (90682.9053, 27899.1124),
        (-9620.6687, -85280.1694),
        (-73887.8198, 42254.8062),
        (66607.2754, 56070.7675),
        (33105.4879, -81044.6990),
        (-85276.3516, -7453.4819),
        (17805.8593, 80039.1881),
        (66912.7955, -39645.1329),
        (-55649.2797, -48122.2958),
        (-26292.6958, 64363.9044),
        (65422.8044, 4148.1730),
        (-15811.1531, -59483.7844),
        (-48020.8718, 31600.0863),
        (41954.8051, 33027.7324),
        (16687.2546, -46422.2966),
        (-45326.0429, -1058.0788),
        (12179.9622, 39625.1568),
    ],
    [
        (737911.2580, 0.0000),
        (-887938.4269, -129821.3413),
        (364300.4394, -557035.3185),
        (-447867.2979, 765952.0768),
        (211929.2928, -522857.8822),
        (-83004.9443, 457498.1514),
        (110823.9607, -80376.3313),
        (272984.1021, -129829.7552),
        (-333162.1321, -240525.9329),
        (-123077.3407, 279934.0888),
        (229189.2959, 95333.7966),
        (19643.0554, -218874.5859),
        (-179076.2070, 75007.1526),
        (146642.7825, 127785.8075),
        (73597.0098, -196196.0158),
        (-220134.5517, -13664.5830),
        (47591.7665, 216328.0929),
        (188219.6695, -103807.8627),
        (-148895.2344, -141482.8621),
        (-83015.6897, 177662.4834),
        (187006.8164, 20305.2355),
        (-39383.7231, -176525.9068),
        (-148487.2925, 89732.1244),
        (125991.4604, 107331.6054),
        (58866.5852, -145439.2756),
        (-147575.9658, -9333.3892),
        (35490.0660, 134019.2097),
        (108113.1589, -71020.1754),
        (-94347.2769, -74325.5013),
        (-37541.4356, 104424.5480),
        (101973.4067, 2373.2740),
        (-27410.1153, -89153.7438),
    ],
    [
        (862641.0809, 0.0000),
        (-960823.9167, -368525.9552),
        (157042.0088, -417334.7194),
        (-253111.6015, 923504.3893),
        (305470.9480, -755996.7095),
        (-334134.5152, 436972.7559),
        (165986.4492, 166228.4842),
        (492368.2080, -256442.6823),
        (-520110.8755, -411969.1845),
        (-229999.9109, 509970.2188),
        (480408.9642, 127208.4335),
        (-26622.6148, -466846.8155),
        (-399419.4932, 194462.6823),
        (326620.2007, 298891.9708),
        (179142.6228, -417599.9949),
        (-459581.2510, -44549.5858),
        (92175.6600, 448875.6264),
        (390327.1920, -216357.1110),
        (-314644.8985, -293786.3987),
        (-172528.4569, 376564.2321),
        (396347.7155, 41736.3441),
        (-83360.6690, -373804.8173),
        (-314133.9236, 189264.8364),
        (265732.3856, 226890.6426),
        (124367.2611, -306840.0724),
        (-311429.4671, -19703.8217),
        (74950.6600, 282871.6666),
        (228217.7249, -149957.0670),
        (-199193.9027, -156905.2019),
        (-79255.7045, 220460.0152),
        (215280.4501, 5012.6123),
        (-57864.1361, -188214.3732),
    ],
    [
        (881250.2893, 0.0000),
        (-948861.0383, -468258.4413),
        (46596.9852, -327316.1869),
        (-144051.9517, 955317.5645),
        (336500.5200, -833600.5935),
        (-441736.9271, 404964.0473),
        (184992.5585, 279986.4437),
        (576344.9301, -306293.9471),
        (-586644.9597, -476235.1348),
        (-271426.5876, 598339.5922),
        (580742.2519, 136625.9570),
        (-48192.9908, -566250.7284),
        (-488518.4452, 243870.0353),
        (399378.0127, 368644.9232),
        (222430.5700, -506314.9649),
        (-555128.3046, -57610.1828),
        (109635.9043, 541542.8741),
        (470854.0560, -261251.1333),
        (-380958.7374, -354487.3294),
        (-208210.8539, 456192.3861),
        (480154.0747, 50257.9256),
        (-100961.2238, -452767.6371),
        (-380422.3098, 229070.2870),
        (321617.5244, 274727.8338),
        (150571.7326, -371391.4632),
        (-376965.4769, -23851.9947),
        (90736.1211, 342410.0494),
        (276258.5988, -181532.9750),
        (-241133.2873, -189936.8936),
        (-95941.4824, 266874.5707),
        (260603.4141, 6068.4542),
        (-70045.6696, -227838.6661),
    ],
    [
        (756319.9360, 0.0000),
        (-830184.1448, -357407.4155),
        (95142.8978, -328889.9007),
        (-179115.0575, 814125.9087),
        (276955.5120, -685727.8861),
        (-330473.3086, 367629.6443),
        (151293.5422, 186916.1025),
        (459099.0364, -241399.6715),
        (-476679.7617, -381890.8083),
        (-215280.5998, 476031.3700),
        (454823.2583, 114023.9763),
        (-31188.3715, -442694.6557),
        (-380270.0772, 187392.5529),
        (310922.9930, 285712.8154),
        (171797.1677, -395919.7318),
        (-434941.7027, -43580.8734),
        (86597.3313, 424565.5761),
        (369168.0049, -204725.1553),
        (-298111.8516, -277894.5932),
        (-163209.0503, 356876.4208),
        (375623.6245, 39440.6476),
        (-78992.3036, -354230.6931),
        (-297658.4618, 179288.6627),
        (251724.5990, 214975.4681),
        (117829.7970, -290673.2089),
        (-295027.9448, -18666.7785),
        (71008.2709, 267978.6211),
        (216204.4108, -142066.8319),
        (-188711.4430, -148646.6663),
        (-75084.4886, 208857.5743),
        (203950.1856, 4748.9981),
        (-54818.5095, -178308.4337),
    ],
    [
        (288081.7743, 0.0000),
        (-442385.0487, 218100.9165),
        (475580.7176, -507449.9340),
        (-510217.4423, 264206.3787),
        (11165.9232, -24622.5835),
        (261597.7013, 299950.3812),
        (-1907.1093, -354015.7700),
        (-108245.8301, 79102.1765),
        (31919.1626, 68274.0721),
        (58737.5827, -117284.3478),
        (-173998.8113, 17675.7283),
        (69155.2642, 176160.8133),
        (165779.9507, -103120.5651),
        (-135186.3291, -135500.1581),
        (-86718.3542, 156823.3247),
        (164833.1762, 30098.6536),
        (-26728.9680, -158562.0858),
        (-137681.5262, 77276.3503),
        (116192.4430, 103966.6681),
        (61186.4176, -140040.6784),
        (-147378.6249, -14391.4333),
        (30901.1790, 138710.3050),
        (116309.4470, -69581.2883),
        (-97683.8711, -83854.2429),
        (-45900.8870, 112873.4227),
        (114632.7621, 7259.3027),
        (-27637.0970, -104165.5207),
        (-84061.7664, 55269.6403),
        (73401.4497, 57803.5280),
        (29200.8320, -81229.2505),
        (-79316.6898, -1848.8151),
        (21316.9167, 69342.9342),
    ],
    [
        (575160.8974, 0.0000),
        (-655813.0790, -203066.1074),
        (157598.8452, -324265.4414),
        (-221971.9312, 610216.0407),
        (192315.0829, -475575.7663),
        (-176134.3594, 310601.7701),
        (103503.1421, 59640.8314),
        (294199.4013, -150388.9044),
        (-321079.4019, -248946.4813),
        (-136407.7465, 304070.8433),
        (278505.7512, 81714.7369),
        (-7994.7262, -269759.1580),
        (-228914.6894, 108649.1058),
        (187239.3343, 169869.9620),
        (101124.3449, -241397.0812),
        (-266634.1348, -24081.1594),
        (54268.6665, 260727.0058),
        (226744.3042, -125563.6506),
        (-182129.0062, -170620.6657),
        (-100181.9834, 217847.5603),
        (229294.9940, 24286.2859),
        (-48237.7708, -216289.2227),
        (-181795.0213, 109592.8617),
        (153872.2571, 131324.8712),
        (71991.9273, -177665.8674),
        (-180314.3217, -11407.4757),
        (43389.5254, 163774.1015),
        (132128.3572, -86814.4619),
        (-115321.0079, -90840.3102),
        (-45884.7113, 127633.8532),
        (124635.6951, 2901.7808),
        (-33500.4705, -108966.1165),
    ],
    [
        (712564.2329, 0.0000),
        (-781778.5215, -337787.5946),
        (88327.0895, -308721.6677),
        (-167433.2559, 767162.9277),
        (261214.2564, -646762.3565),
        (-312510.9350, 345883.6335),
        (142718.4073, 177371.6542),
        (433383.7055, -227944.4727),
        (-449739.4742, -360435.1329),
        (-203245.9914, 449382.6784),
        (429546.7117, 107504.1814),
        (-29625.9124, -418112.4538),
        (-359197.3861, 177072.1411),
        (293692.0958, 269912.6861),
        (162312.3085, -373932.7122),
        (-410765.4067, -41198.9691),
        (81765.6288, 400959.0571),
        (348641.1076, -193344.5535),
        (-281550.8584, -262443.7556),
        (-154135.0636, 337053.7005),
        (354759.5342, 37246.6748),
        (-74604.3855, -334554.0577),
        (-281123.5324, 169327.7573),
        (237739.2751, 203033.1407),
        (111283.9306, -274524.2013),
        (-278637.2039, -17629.7352),
        (67063.4349, 253090.7755),
        (204193.0018, -134174.2941),
        (-178227.5148, -140388.5077),
        (-70913.1320, 197254.3962),
        (192619.6279, 4485.1708),
        (-51773.0326, -168402.4119),
    ],
];
